// ABOUTME: Depth-bounded recursive walk over decoded page data that emits video records.
// ABOUTME: Node shapes are checked in a fixed priority order; the first matching shape is terminal.

//! Structured-data walker.
//!
//! Each object node is classified into at most one shape. Shapes are
//! tested in this order, and the order is significant:
//!
//! 1. flat video node (`videoId` + `title`)
//! 2. `contents` array whose elements wrap `itemSectionRenderer.contents`
//! 3. `twoColumnSearchResultsRenderer.primaryContents`
//! 4. `sectionListRenderer.contents`
//! 5. `videoRenderer`
//! 6. `itemSectionRenderer.contents`
//! 7. `compactVideoRenderer`
//!
//! A node matching none of them is treated as a generic container and every
//! child is visited. Nodes deeper than [`MAX_DEPTH`] are skipped.

use serde_json::{Map, Value};

use crate::duration::{to_canonical, DurationInput};
use crate::models::{Thumbnails, VideoRecord, UNKNOWN_CHANNEL, UNKNOWN_TITLE};

/// Maximum recursion depth below the root.
pub const MAX_DEPTH: usize = 10;

/// Recognized node shapes, borrowing the part of the node each one descends into.
#[derive(Debug, Clone, Copy)]
enum Shape<'a> {
    FlatVideo(&'a Map<String, Value>),
    ContentsArray(&'a [Value]),
    TwoColumnSearch(&'a Value),
    SectionList(&'a [Value]),
    VideoRenderer(&'a Value),
    ItemSection(&'a [Value]),
    CompactVideoRenderer(&'a Value),
}

impl Shape<'_> {
    fn name(&self) -> &'static str {
        match self {
            Shape::FlatVideo(_) => "flat-video",
            Shape::ContentsArray(_) => "contents",
            Shape::TwoColumnSearch(_) => "twoColumnSearchResultsRenderer",
            Shape::SectionList(_) => "sectionListRenderer",
            Shape::VideoRenderer(_) => "videoRenderer",
            Shape::ItemSection(_) => "itemSectionRenderer",
            Shape::CompactVideoRenderer(_) => "compactVideoRenderer",
        }
    }
}

/// Walks a decoded tree and returns every video found, in traversal order.
pub fn walk(tree: &Value) -> Vec<VideoRecord> {
    let mut videos = Vec::new();
    visit(tree, 0, &mut videos);
    videos
}

fn visit(node: &Value, depth: usize, out: &mut Vec<VideoRecord>) {
    if depth > MAX_DEPTH {
        return;
    }

    let shape = node.as_object().and_then(classify);
    let Some(shape) = shape else {
        match node {
            Value::Array(items) => items.iter().for_each(|item| visit(item, depth + 1, out)),
            Value::Object(map) => map.values().for_each(|child| visit(child, depth + 1, out)),
            _ => {}
        }
        return;
    };

    tracing::trace!(depth, shape = shape.name(), "matched node shape");
    match shape {
        Shape::FlatVideo(map) => out.extend(flat_video(map)),
        Shape::ContentsArray(items) => {
            for inner in items.iter().filter_map(item_section_contents).flatten() {
                visit(inner, depth + 1, out);
            }
        }
        Shape::TwoColumnSearch(primary) => visit(primary, depth + 1, out),
        Shape::SectionList(sections) | Shape::ItemSection(sections) => {
            sections.iter().for_each(|s| visit(s, depth + 1, out));
        }
        Shape::VideoRenderer(renderer) => out.extend(renderer_video(renderer, Byline::Owner)),
        Shape::CompactVideoRenderer(renderer) => {
            out.extend(renderer_video(renderer, Byline::Short))
        }
    }
}

fn classify(obj: &Map<String, Value>) -> Option<Shape<'_>> {
    if non_empty_str(obj.get("videoId")).is_some() && obj.get("title").is_some_and(truthy) {
        return Some(Shape::FlatVideo(obj));
    }
    if let Some(items) = obj.get("contents").and_then(Value::as_array) {
        return Some(Shape::ContentsArray(items));
    }
    if let Some(primary) = obj
        .get("twoColumnSearchResultsRenderer")
        .and_then(|r| r.get("primaryContents"))
        .filter(|v| truthy(v))
    {
        return Some(Shape::TwoColumnSearch(primary));
    }
    if let Some(sections) = nested_array(obj, "sectionListRenderer") {
        return Some(Shape::SectionList(sections));
    }
    if let Some(renderer) = renderer_with_id(obj, "videoRenderer") {
        return Some(Shape::VideoRenderer(renderer));
    }
    if let Some(contents) = nested_array(obj, "itemSectionRenderer") {
        return Some(Shape::ItemSection(contents));
    }
    if let Some(renderer) = renderer_with_id(obj, "compactVideoRenderer") {
        return Some(Shape::CompactVideoRenderer(renderer));
    }
    None
}

/// `obj[key].contents` when it is an array.
fn nested_array<'a>(obj: &'a Map<String, Value>, key: &str) -> Option<&'a [Value]> {
    obj.get(key)?
        .get("contents")?
        .as_array()
        .map(Vec::as_slice)
}

fn item_section_contents(item: &Value) -> Option<&[Value]> {
    item.as_object()
        .and_then(|obj| nested_array(obj, "itemSectionRenderer"))
}

fn renderer_with_id<'a>(obj: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    let renderer = obj.get(key)?;
    non_empty_str(renderer.get("videoId")).map(|_| renderer)
}

fn flat_video(obj: &Map<String, Value>) -> Option<VideoRecord> {
    let id = non_empty_str(obj.get("videoId"))?;

    let title = match obj.get("title") {
        Some(Value::String(s)) => s.clone(),
        Some(v @ Value::Object(_)) => run_text(Some(v))
            .or_else(|| simple_text(Some(v)))
            .unwrap_or(UNKNOWN_TITLE)
            .to_string(),
        Some(other) => other.to_string(),
        None => UNKNOWN_TITLE.to_string(),
    };

    let channel = ["channelName", "authorName", "channelTitle"]
        .iter()
        .find_map(|key| non_empty_str(obj.get(*key)))
        .unwrap_or(UNKNOWN_CHANNEL);

    let medium = ["thumbnail", "thumbnailUrl"]
        .iter()
        .find_map(|key| non_empty_str(obj.get(*key)))
        .map(str::to_string);

    let length = ["lengthSeconds", "duration"]
        .iter()
        .filter_map(|key| obj.get(*key))
        .find(|v| truthy(v))
        .map_or(DurationInput::Missing, DurationInput::from);

    Some(
        VideoRecord::new(id, title, channel)
            .with_thumbnails(Thumbnails::with_medium(id, medium))
            .with_duration(to_canonical(length)),
    )
}

/// Where a renderer keeps its channel name.
#[derive(Debug, Clone, Copy)]
enum Byline {
    /// `ownerText` runs, then a plain `channelName` string.
    Owner,
    /// `shortBylineText` runs only.
    Short,
}

/// Builds a record from a `videoRenderer`-like node.
fn renderer_video(renderer: &Value, byline: Byline) -> Option<VideoRecord> {
    let id = non_empty_str(renderer.get("videoId"))?;

    let title_node = renderer.get("title");
    let title = run_text(title_node)
        .or_else(|| simple_text(title_node))
        .unwrap_or(UNKNOWN_TITLE);

    let channel = match byline {
        Byline::Owner => run_text(renderer.get("ownerText"))
            .or_else(|| non_empty_str(renderer.get("channelName"))),
        Byline::Short => run_text(renderer.get("shortBylineText")),
    }
    .unwrap_or(UNKNOWN_CHANNEL);

    let thumbs: Vec<Option<&str>> = renderer
        .pointer("/thumbnail/thumbnails")
        .and_then(Value::as_array)
        .map(|list| {
            list.iter()
                .map(|t| t.get("url").and_then(Value::as_str))
                .collect()
        })
        .unwrap_or_default();

    let length = simple_text(renderer.get("lengthText")).unwrap_or("0:00");

    Some(
        VideoRecord::new(id, title, channel)
            .with_thumbnails(Thumbnails::from_list(id, &thumbs))
            .with_duration(to_canonical(length)),
    )
}

/// `node.runs[0].text`
fn run_text(node: Option<&Value>) -> Option<&str> {
    non_empty_str(node?.get("runs")?.get(0)?.get("text"))
}

/// `node.simpleText`
fn simple_text(node: Option<&Value>) -> Option<&str> {
    non_empty_str(node?.get("simpleText"))
}

fn non_empty_str(value: Option<&Value>) -> Option<&str> {
    value?.as_str().filter(|s| !s.is_empty())
}

fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
