use super::parse_spans;
use super::render_blocks;
use super::BlockNode;
use super::InlineSpan;

fn text(value: &str) -> InlineSpan {
    return InlineSpan::Text(value.to_string());
}

fn bold(value: &str) -> InlineSpan {
    return InlineSpan::Bold(value.to_string());
}

fn italic(value: &str) -> InlineSpan {
    return InlineSpan::Italic(value.to_string());
}

mod render_blocks_pass {
    use super::*;

    #[test]
    fn it_renders_lists_breaks_and_paragraphs_in_order() {
        let blocks = render_blocks("- a\n- b\n\nHello **world**");

        assert_eq!(blocks.len(), 3);
        assert_eq!(
            blocks[0],
            BlockNode::List(vec![vec![text("a")], vec![text("b")]])
        );
        assert_eq!(blocks[1], BlockNode::LineBreak);
        assert_eq!(
            blocks[2],
            BlockNode::Paragraph(vec![text("Hello "), bold("world")])
        );
    }

    #[test]
    fn it_strips_heading_prefixes() {
        let blocks = render_blocks("## Title");
        assert_eq!(blocks, vec![BlockNode::Heading(vec![text("Title")])]);

        let blocks = render_blocks("### Smaller");
        assert_eq!(blocks, vec![BlockNode::SubHeading(vec![text("Smaller")])]);
    }

    #[test]
    fn it_merges_numbered_and_bulleted_lines_into_one_list() {
        let blocks = render_blocks("1. first\n- second\n* third\n12. fourth");

        assert_eq!(
            blocks,
            vec![BlockNode::List(vec![
                vec![text("first")],
                vec![text("second")],
                vec![text("third")],
                vec![text("fourth")],
            ])]
        );
    }

    #[test]
    fn it_flushes_a_pending_list_on_non_bullet_lines() {
        let blocks = render_blocks("- a\n## Title\n- b");

        assert_eq!(blocks.len(), 3);
        assert_eq!(blocks[0], BlockNode::List(vec![vec![text("a")]]));
        assert_eq!(blocks[1], BlockNode::Heading(vec![text("Title")]));
        assert_eq!(blocks[2], BlockNode::List(vec![vec![text("b")]]));
    }

    #[test]
    fn it_flushes_a_pending_list_at_end_of_input() {
        let blocks = render_blocks("Intro\n- tail");

        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[1], BlockNode::List(vec![vec![text("tail")]]));
    }

    #[test]
    fn it_treats_a_dotted_word_as_a_paragraph() {
        let blocks = render_blocks("v1. is not a list item");
        assert_eq!(blocks.len(), 1);
        assert!(matches!(blocks[0], BlockNode::Paragraph(_)));

        let blocks = render_blocks("1.missing whitespace");
        assert_eq!(blocks.len(), 1);
        assert!(matches!(blocks[0], BlockNode::Paragraph(_)));
    }

    #[test]
    fn it_is_deterministic() {
        let input = "## Plan\n\n- **goal** one\n- *scope* two\n1. three\n\nClosing *note*";
        let first = render_blocks(input);
        let second = render_blocks(input);
        assert_eq!(first, second);
    }
}

mod parse_spans_pass {
    use super::*;

    #[test]
    fn it_recognizes_bold_before_italic() {
        let spans = parse_spans("**x**");
        assert_eq!(spans, vec![bold("x")]);
    }

    #[test]
    fn it_mixes_plain_bold_and_italic() {
        let spans = parse_spans("plain **bold** and *italic* tail");
        assert_eq!(
            spans,
            vec![
                text("plain "),
                bold("bold"),
                text(" and "),
                italic("italic"),
                text(" tail"),
            ]
        );
    }

    #[test]
    fn it_emits_unmatched_markers_as_plain_text() {
        let spans = parse_spans("a ** b");
        assert_eq!(spans, vec![text("a *"), text("*"), text(" b")]);

        let spans = parse_spans("dangling *tail");
        assert_eq!(spans, vec![text("dangling *"), text("tail")]);
    }

    #[test]
    fn it_does_not_nest_spans() {
        let spans = parse_spans("**outer *inner* still**");
        assert_eq!(spans, vec![bold("outer *inner* still")]);
    }

    #[test]
    fn it_handles_empty_input() {
        assert!(parse_spans("").is_empty());
    }
}

mod fixtures {
    use super::*;

    fn plain_spans(spans: &[InlineSpan]) -> String {
        return spans
            .iter()
            .map(|span| {
                return match span {
                    InlineSpan::Text(value) => value.to_string(),
                    InlineSpan::Bold(value) => format!("<b>{value}</b>"),
                    InlineSpan::Italic(value) => format!("<i>{value}</i>"),
                };
            })
            .collect::<Vec<String>>()
            .join("");
    }

    fn plain(blocks: &[BlockNode]) -> String {
        let mut lines: Vec<String> = vec![];
        for block in blocks {
            match block {
                BlockNode::Heading(spans) => lines.push(format!("H1 {}", plain_spans(spans))),
                BlockNode::SubHeading(spans) => lines.push(format!("H2 {}", plain_spans(spans))),
                BlockNode::Paragraph(spans) => lines.push(format!("P {}", plain_spans(spans))),
                BlockNode::List(items) => {
                    for item in items {
                        lines.push(format!("* {}", plain_spans(item)));
                    }
                }
                BlockNode::LineBreak => lines.push("".to_string()),
            }
        }

        return lines.join("\n");
    }

    #[test]
    fn it_renders_a_full_reply() {
        test_utils::insta_snapshot(|| {
            let res = plain(&render_blocks(test_utils::interview_reply_fixture()));
            insta::assert_snapshot!(res, @r###"
            H1 Where we are

            P Thanks, that fills in a lot. Here's what I have so far.

            H2 Budget
            * <b>Total</b>: 40k over <i>two</i> years
            * Staffing and facilitation
            * Venue hire
            * Materials

            H2 Still open
            P We haven't talked about who benefits from the workshops yet. Tell me about the groups you want to reach, and roughly how many people you expect in the <i>first</i> year.

            P That's it for now!
            "###);
        });
    }
}
