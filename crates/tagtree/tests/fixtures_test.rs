use std::fs;
use tagtree::from_str;

#[test]
fn test_valid_fixtures() -> Result<(), Box<dyn std::error::Error>> {
    let valid_dir = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/valid");
    for entry in fs::read_dir(valid_dir)? {
        let entry = entry?;
        let path = entry.path();
        let content = fs::read_to_string(&path)?;
        let result = from_str(&content);
        if let Err(err) = result {
            return Err(std::io::Error::other(format!(
                "Failed to parse valid file {path:?}: {err}"
            ))
            .into());
        }
    }
    Ok(())
}

#[test]
fn test_invalid_fixtures() -> Result<(), Box<dyn std::error::Error>> {
    let invalid_dir = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/invalid");
    for entry in fs::read_dir(invalid_dir)? {
        let entry = entry?;
        let path = entry.path();
        let content = fs::read_to_string(&path)?;
        let result = from_str(&content);
        if result.is_ok() {
            return Err(std::io::Error::other(format!(
                "Should fail to parse invalid file: {path:?}"
            ))
            .into());
        }
    }
    Ok(())
}

#[test]
fn test_podcast_feed_navigation() -> Result<(), Box<dyn std::error::Error>> {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/valid/podcast.xml");
    let rss = from_str(&fs::read_to_string(path)?)?;

    assert_eq!(rss.attr("version"), Some("2.0"));
    assert_eq!(rss.attr("itunes"), Some("http://www.itunes.com/dtds/podcast-1.0.dtd"));

    let channel = rss.get_child_by_name("channel").ok_or("no channel")?;
    assert_eq!(
        channel.get_child_by_name("title").map(|t| t.content()).as_deref(),
        Some("Kilobit & Friends")
    );

    let author = rss.get_by_tag_name("author").ok_or("no author")?;
    assert_eq!(author.namespace(), "http://www.itunes.com/dtds/podcast-1.0.dtd");

    let transcript = rss.get_by_tag_name("transcript").ok_or("no transcript")?;
    assert_eq!(transcript.namespace(), "https://podcastindex.org/namespace/1.0");
    assert_eq!(transcript.attr("type"), Some("text/vtt"));

    let description = rss.get_by_tag_name("description").ok_or("no description")?;
    assert_eq!(description.content(), "<p>Show notes</p>");
    Ok(())
}

#[test]
fn test_mixed_content_order() -> Result<(), Box<dyn std::error::Error>> {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/valid/mixed.xml");
    let p = from_str(&fs::read_to_string(path)?)?;

    assert_eq!(p.n_children(), 5);
    assert_eq!(p.char_data(), vec!["Hello, ", " and ", " world"]);
    assert_eq!(p.content(), "Hello,  and  world");
    Ok(())
}

#[test]
fn test_doctype_and_entities() -> Result<(), Box<dyn std::error::Error>> {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/valid/doctype.xml");
    let note = from_str(&fs::read_to_string(path)?)?;

    assert_eq!(note.name(), "note");
    assert_eq!(note.attr("lang"), Some("en"));
    assert_eq!(
        note.get_child_by_name("body").map(|b| b.content()).as_deref(),
        Some("Don't forget me \u{263A}")
    );
    Ok(())
}
