use std::env;

pub fn insta_snapshot<F: FnOnce()>(f: F) {
    let mut settings = insta::Settings::clone_current();
    let snapshot_path = env::current_dir().unwrap().join("./test/snapshots");
    settings.set_snapshot_path(snapshot_path);
    settings.bind(f);
}

pub fn interview_reply_fixture() -> &'static str {
    return r#"
## Where we are

Thanks, that fills in a lot. Here's what I have so far.

### Budget
- **Total**: 40k over *two* years
- Staffing and facilitation
1. Venue hire
2. Materials

### Still open
We haven't talked about who benefits from the workshops yet. Tell me about the groups you want to reach, and roughly how many people you expect in the *first* year.

That's it for now!
"#
    .trim();
}
