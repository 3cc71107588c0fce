// ABOUTME: Integration tests for the extraction engine against page-shaped fixtures.
// ABOUTME: Covers strategy fallback, duration round trips, filters and idempotence.

use pretty_assertions::assert_eq;
use tubeparse_engine::{
    extract, extract_detailed, filter_by_min_duration, filter_official, to_canonical, to_seconds,
    PostFilter, Strategy, ZERO_DURATION,
};

fn search_page() -> String {
    let data = r#"{
        "responseContext": {"serviceTrackingParams": []},
        "contents": {
            "twoColumnSearchResultsRenderer": {
                "primaryContents": {
                    "sectionListRenderer": {
                        "contents": [
                            {"itemSectionRenderer": {"contents": [
                                {"videoRenderer": {
                                    "videoId": "dQw4w9WgXcQ",
                                    "thumbnail": {"thumbnails": [
                                        {"url": "https://i.ytimg.com/vi/dQw4w9WgXcQ/hq720.jpg", "width": 360}
                                    ]},
                                    "title": {"runs": [{"text": "Never Gonna Give You Up"}]},
                                    "ownerText": {"runs": [{"text": "Rick Astley - Topic"}]},
                                    "lengthText": {"simpleText": "3:33"}
                                }},
                                {"videoRenderer": {
                                    "videoId": "shortclip01",
                                    "title": {"runs": [{"text": "A short clip"}]},
                                    "ownerText": {"runs": [{"text": "Clips"}]},
                                    "lengthText": {"simpleText": "0:39"}
                                }},
                                {"videoRenderer": {
                                    "videoId": "longmix0001",
                                    "title": {"simpleText": "Two hour mix"},
                                    "ownerText": {"runs": [{"text": "DJ - Topic"}]},
                                    "lengthText": {"simpleText": "2:00:00"}
                                }}
                            ]}}
                        ]
                    }
                }
            }
        }
    }"#;
    format!(
        "<!DOCTYPE html><html><head><script>var ytInitialData = {};</script></head><body></body></html>",
        data
    )
}

#[test]
fn search_page_uses_structured_data() {
    let result = extract_detailed(&search_page());

    assert_eq!(result.strategy, Some(Strategy::InitialData));
    let ids: Vec<_> = result.videos.iter().map(|v| v.video_id()).collect();
    assert_eq!(ids, vec!["dQw4w9WgXcQ", "shortclip01", "longmix0001"]);

    let first = &result.videos[0];
    assert_eq!(first.title(), "Never Gonna Give You Up");
    assert_eq!(first.channel_title(), "Rick Astley - Topic");
    assert_eq!(first.duration(), "PT3M33S");
    assert_eq!(
        first.snippet.thumbnails.default.url,
        "https://i.ytimg.com/vi/dQw4w9WgXcQ/hq720.jpg"
    );
    assert_eq!(
        first.snippet.thumbnails.medium.url,
        "https://i.ytimg.com/vi/dQw4w9WgXcQ/mqdefault.jpg"
    );
    assert_eq!(result.videos[2].duration(), "PT2H0M0S");
}

#[test]
fn search_page_through_post_filters() {
    let videos = extract(&search_page());

    let official = filter_official(videos.clone());
    assert_eq!(official.len(), 2);

    let long_enough = filter_by_min_duration(videos.clone(), 40);
    let ids: Vec<_> = long_enough.iter().map(|v| v.video_id()).collect();
    assert_eq!(ids, vec!["dQw4w9WgXcQ", "longmix0001"]);

    let capped = PostFilter {
        official_only: true,
        min_duration: 40,
        max_results: Some(1),
    }
    .apply(videos);
    assert_eq!(capped.len(), 1);
    assert_eq!(capped[0].video_id(), "dQw4w9WgXcQ");
}

#[test]
fn watch_page_compact_renderers() {
    let html = r#"<script>window["ytInitialData"] = null; ytInitialData = {"contents":{"twoColumnWatchNextResults":{"secondaryResults":{"secondaryResults":{"results":[
        {"compactVideoRenderer":{"videoId":"related0001","title":{"simpleText":"Related one"},"shortBylineText":{"runs":[{"text":"Someone"}]},"lengthText":{"simpleText":"10:01"}}},
        {"compactVideoRenderer":{"videoId":"related0002","title":{"runs":[{"text":"Related two"}]}}}
    ]}}}}};</script>"#;

    let result = extract_detailed(html);
    assert_eq!(result.strategy, Some(Strategy::InitialDataLoose));
    assert_eq!(result.videos.len(), 2);
    assert_eq!(result.videos[0].channel_title(), "Someone");
    assert_eq!(to_seconds(result.videos[0].duration()), 601);
    assert_eq!(result.videos[1].title(), "Related two");
    assert_eq!(result.videos[1].duration(), ZERO_DURATION);
}

#[test]
fn falls_through_to_regex_with_placeholder_titles() {
    let html = r#"<html><body>
        <a href="https://www.youtube.com/watch?v=aaaaaaaaaaa">one</a>
        <a href="https://www.youtube.com/watch?v=bbbbbbbbbbb">two</a>
        <a href="https://www.youtube.com/watch?v=ccccccccccc">three</a>
    </body></html>"#;

    let result = extract_detailed(html);
    assert_eq!(result.strategy, Some(Strategy::Regex));
    let titles: Vec<_> = result.videos.iter().map(|v| v.title()).collect();
    assert_eq!(titles, vec!["Video 1", "Video 2", "Video 3"]);
    assert!(result.videos.iter().all(|v| v.duration() == ZERO_DURATION));
}

#[test]
fn malformed_blob_falls_back() {
    let html = r#"<script>var ytInitialData = {"contents": [</script>
        <div data-video-id="attrOnly01" data-title="Attribute title" data-channel="Chan"></div>"#;

    let result = extract_detailed(html);
    assert_eq!(result.strategy, Some(Strategy::Attributes));
    assert_eq!(result.videos[0].title(), "Attribute title");
    assert_eq!(result.videos[0].channel_title(), "Chan");
}

#[test]
fn broken_var_blob_falls_back_to_loose_anchor() {
    let html = r#"<script>{"ytInitialData": {"videoId":"good1","title":"Good"}}</script>
        <script>var ytInitialData = {broken</script>"#;

    let result = extract_detailed(html);
    assert_eq!(result.strategy, Some(Strategy::InitialDataLoose));
    let ids: Vec<_> = result.videos.iter().map(|v| v.video_id()).collect();
    assert_eq!(ids, vec!["good1"]);
    assert_eq!(result.videos[0].title(), "Good");
}

#[test]
fn unrecognized_page_is_empty_not_error() {
    assert!(extract("<html><head><title>Oops</title></head></html>").is_empty());
}

#[test]
fn extraction_is_idempotent() {
    let page = search_page();
    assert_eq!(extract(&page), extract(&page));

    let regex_page = r#"/watch?v=abc123 title="Some title here""#;
    assert_eq!(extract(regex_page), extract(regex_page));
}

#[test]
fn duration_round_trips() {
    let cases: &[(&str, u64)] = &[
        ("4:13", 253),
        ("0:40", 40),
        ("1:02:03", 3723),
        ("10:00:00", 36000),
        ("90", 90),
        ("3600", 3600),
        ("PT1H2M3S", 3723),
        ("PT39S", 39),
        ("PT2M", 120),
    ];
    for (input, expected) in cases {
        assert_eq!(to_seconds(&to_canonical(*input)), *expected, "input {input}");
    }
    for secs in [0u64, 1, 59, 60, 61, 3599, 3600, 86399] {
        assert_eq!(to_seconds(&to_canonical(secs)), secs);
    }
}

#[test]
fn zero_forms_agree() {
    assert_eq!(to_canonical(None::<&str>), ZERO_DURATION);
    assert_eq!(to_canonical(""), ZERO_DURATION);
    assert_eq!(to_canonical(0u64), ZERO_DURATION);
    assert_eq!(to_canonical("0:00"), ZERO_DURATION);
}
