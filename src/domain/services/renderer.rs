#[cfg(test)]
#[path = "renderer_test.rs"]
mod tests;

/// Inline runs within a single block's text. Spans never nest; the
/// source material is assistant-generated prose, not arbitrary markdown.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InlineSpan {
    Text(String),
    Bold(String),
    Italic(String),
}

/// Block-level render nodes, in document order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BlockNode {
    Heading(Vec<InlineSpan>),
    SubHeading(Vec<InlineSpan>),
    Paragraph(Vec<InlineSpan>),
    List(Vec<Vec<InlineSpan>>),
    LineBreak,
}

// Matches a `^\d+\.\s` prefix and returns the item text behind it.
// Numbered lines share a list block with bulleted lines, so the numeric
// prefix is dropped rather than reproduced.
fn split_numbered(line: &str) -> Option<&str> {
    let digits = line.bytes().take_while(|b| return b.is_ascii_digit()).count();
    if digits == 0 || !line[digits..].starts_with('.') {
        return None;
    }

    let rest = &line[digits + 1..];
    if !rest.chars().next()?.is_whitespace() {
        return None;
    }

    return Some(rest.trim_start());
}

fn flush_list(pending: &mut Vec<Vec<InlineSpan>>, blocks: &mut Vec<BlockNode>) {
    if !pending.is_empty() {
        blocks.push(BlockNode::List(std::mem::take(pending)));
    }
}

fn push_text(spans: &mut Vec<InlineSpan>, text: &str) {
    if !text.is_empty() {
        spans.push(InlineSpan::Text(text.to_string()));
    }
}

/// Single left-to-right scan over a block's text. Double-asterisk is
/// checked before single at every marker so `**x**` never tokenizes as
/// two italic spans. Unmatched markers fall through as plain text.
pub fn parse_spans(text: &str) -> Vec<InlineSpan> {
    let mut spans: Vec<InlineSpan> = vec![];
    let mut rest = text;

    while let Some(star) = rest.find('*') {
        if rest[star..].starts_with("**") {
            if let Some(close) = rest[star + 2..].find("**") {
                if close > 0 {
                    push_text(&mut spans, &rest[..star]);
                    spans.push(InlineSpan::Bold(rest[star + 2..star + 2 + close].to_string()));
                    rest = &rest[star + 2 + close + 2..];
                    continue;
                }
            }
        } else if let Some(close) = rest[star + 1..].find('*') {
            if close > 0 {
                push_text(&mut spans, &rest[..star]);
                spans.push(InlineSpan::Italic(
                    rest[star + 1..star + 1 + close].to_string(),
                ));
                rest = &rest[star + 1 + close + 1..];
                continue;
            }
        }

        push_text(&mut spans, &rest[..star + 1]);
        rest = &rest[star + 1..];
    }

    push_text(&mut spans, rest);
    return spans;
}

/// Converts a restricted markdown-like text block into an ordered
/// sequence of block nodes. Line-oriented single pass: consecutive
/// bulleted or numbered lines accumulate into one list block, any other
/// line flushes the pending list first. Pure and idempotent, safe to
/// call on every render.
pub fn render_blocks(text: &str) -> Vec<BlockNode> {
    let mut blocks: Vec<BlockNode> = vec![];
    let mut pending_list: Vec<Vec<InlineSpan>> = vec![];

    for line in text.split('\n') {
        let trimmed = line.trim();

        if trimmed.starts_with("- ") || trimmed.starts_with("* ") {
            pending_list.push(parse_spans(&trimmed[2..]));
            continue;
        }

        if let Some(item) = split_numbered(trimmed) {
            pending_list.push(parse_spans(item));
            continue;
        }

        flush_list(&mut pending_list, &mut blocks);

        if trimmed.is_empty() {
            blocks.push(BlockNode::LineBreak);
            continue;
        }

        if let Some(heading) = line.strip_prefix("### ") {
            blocks.push(BlockNode::SubHeading(parse_spans(heading)));
            continue;
        }

        if let Some(heading) = line.strip_prefix("## ") {
            blocks.push(BlockNode::Heading(parse_spans(heading)));
            continue;
        }

        blocks.push(BlockNode::Paragraph(parse_spans(line)));
    }

    flush_list(&mut pending_list, &mut blocks);

    return blocks;
}
