use std::path::Path;

use findex::{EntryType, Error, Index, IndexOptions, Strategy};

// Content-bearing fixture.
const EXAMPLE1_FILENAME: &str = "example_file.pdf";
const EXAMPLE1_KEYWORDS: &str = "example keywords here";
const EXAMPLE1_CONTENT: &[u8] = b"example content";
const EXAMPLE1_ENTRY_ID: &str =
    "a2dee47ba6268925da97750ab742baf67f02e2fb54ce23d499fb66a5b0222903";

// Content-bearing fixture with an external handle.
const EXAMPLE2_FILENAME: &str = "example_file2.pdf";
const EXAMPLE2_KEYWORDS: &str = "example badwords there";
const EXAMPLE2_CONTENT: &[u8] = b"example content2";
const EXAMPLE2_ENTRY_ID: &str =
    "400ae780e7a437dda7d518fb9ed09ba5e80754ceef632a49470e9a5a91291e84";
const EXAMPLE2_EXTRA: &str = "extra meat";

// Reference-only fixture: no content, id derives from metadata.
const EXAMPLE3_FILENAME: &str = "file3.zip";
const EXAMPLE3_KEYWORDS: &str = "every good boy does good";
const EXAMPLE3_ENTRY_ID: &str =
    "91c45a67989316c4b1786d234d7042f0f878f116847c2b33287aa53e09585656";

fn options(strategy: Strategy) -> IndexOptions {
    IndexOptions {
        strategy,
        compression: false,
    }
}

fn open(dir: &Path, strategy: Strategy) -> Index {
    Index::open(dir, options(strategy)).unwrap()
}

fn add_examples(index: &mut Index) {
    index
        .add_entry(EXAMPLE1_FILENAME, EXAMPLE1_KEYWORDS, EXAMPLE1_CONTENT, "")
        .unwrap();
    index
        .add_entry(
            EXAMPLE2_FILENAME,
            EXAMPLE2_KEYWORDS,
            EXAMPLE2_CONTENT,
            EXAMPLE2_EXTRA,
        )
        .unwrap();
    index
        .add_entry(EXAMPLE3_FILENAME, EXAMPLE3_KEYWORDS, b"", "")
        .unwrap();
}

fn both_strategies(test: impl Fn(Strategy)) {
    test(Strategy::Linear);
    test(Strategy::Inverted);
}

#[test]
fn add_entry_returns_expected_descriptors() {
    both_strategies(|strategy| {
        let tmp = tempfile::tempdir().unwrap();
        let mut index = open(tmp.path(), strategy);

        let first = index
            .add_entry(
                EXAMPLE1_FILENAME,
                EXAMPLE1_KEYWORDS,
                EXAMPLE1_CONTENT,
                "",
            )
            .unwrap();
        assert_eq!(first.entry_type, EntryType::Present);
        assert_eq!(first.entry_id.as_str(), EXAMPLE1_ENTRY_ID);
        assert_eq!(first.filename, EXAMPLE1_FILENAME);
        assert_eq!(first.keywords, EXAMPLE1_KEYWORDS);
        assert_eq!(first.extra, "");

        let second = index
            .add_entry(
                EXAMPLE2_FILENAME,
                EXAMPLE2_KEYWORDS,
                EXAMPLE2_CONTENT,
                EXAMPLE2_EXTRA,
            )
            .unwrap();
        assert_eq!(second.entry_type, EntryType::Present);
        assert_eq!(second.entry_id.as_str(), EXAMPLE2_ENTRY_ID);
        assert_eq!(second.extra, EXAMPLE2_EXTRA);

        let third = index
            .add_entry(EXAMPLE3_FILENAME, EXAMPLE3_KEYWORDS, b"", "")
            .unwrap();
        assert_eq!(third.entry_type, EntryType::Absent);
        assert_eq!(third.entry_id.as_str(), EXAMPLE3_ENTRY_ID);

        index.close().unwrap();
    });
}

#[test]
fn saved_content_is_retrievable() {
    both_strategies(|strategy| {
        let tmp = tempfile::tempdir().unwrap();
        let mut index = open(tmp.path(), strategy);
        add_examples(&mut index);

        assert_eq!(index.get_file(EXAMPLE1_ENTRY_ID).unwrap(), EXAMPLE1_CONTENT);
        assert_eq!(index.get_file(EXAMPLE2_ENTRY_ID).unwrap(), EXAMPLE2_CONTENT);

        // The reference-only entry has no blob.
        let err = index.get_file(EXAMPLE3_ENTRY_ID).unwrap_err();
        assert!(matches!(err, Error::NotFound { .. }));

        index.close().unwrap();
    });
}

#[test]
fn closing_and_reopening_keeps_data() {
    both_strategies(|strategy| {
        let tmp = tempfile::tempdir().unwrap();
        let mut index = open(tmp.path(), strategy);
        add_examples(&mut index);
        index.close().unwrap();

        let index = open(tmp.path(), strategy);
        assert_eq!(index.entry_count(), 3);
        assert_eq!(index.get_file(EXAMPLE1_ENTRY_ID).unwrap(), EXAMPLE1_CONTENT);

        let results = index.search("keywords").unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].entry_type, EntryType::Present);
        assert_eq!(results[0].entry_id.as_str(), EXAMPLE1_ENTRY_ID);
        assert_eq!(results[0].filename, EXAMPLE1_FILENAME);
        assert_eq!(results[0].keywords, EXAMPLE1_KEYWORDS);
        assert_eq!(results[0].extra, "");

        index.close().unwrap();
    });
}

#[test]
fn search_finds_one_entry() {
    both_strategies(|strategy| {
        let tmp = tempfile::tempdir().unwrap();
        let mut index = open(tmp.path(), strategy);
        add_examples(&mut index);

        let results = index.search("keywords").unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].filename, EXAMPLE1_FILENAME);

        index.close().unwrap();
    });
}

#[test]
fn search_finds_many_entries() {
    both_strategies(|strategy| {
        let tmp = tempfile::tempdir().unwrap();
        let mut index = open(tmp.path(), strategy);
        add_examples(&mut index);

        let mut results = index.search("example").unwrap();
        results.sort_by(|a, b| a.filename.cmp(&b.filename));
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].filename, EXAMPLE1_FILENAME);
        assert_eq!(results[0].entry_id.as_str(), EXAMPLE1_ENTRY_ID);
        assert_eq!(results[1].filename, EXAMPLE2_FILENAME);
        assert_eq!(results[1].entry_id.as_str(), EXAMPLE2_ENTRY_ID);
        assert_eq!(results[1].extra, EXAMPLE2_EXTRA);

        index.close().unwrap();
    });
}

#[test]
fn inverted_intersection_narrows_results() {
    let tmp = tempfile::tempdir().unwrap();
    let mut index = open(tmp.path(), Strategy::Inverted);
    add_examples(&mut index);

    // Both content entries share "example"; only one has "badwords".
    assert_eq!(index.search("example").unwrap().len(), 2);
    let results = index.search("example badwords").unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].filename, EXAMPLE2_FILENAME);

    index.close().unwrap();
}

#[test]
fn double_adding_fails() {
    both_strategies(|strategy| {
        let tmp = tempfile::tempdir().unwrap();
        let mut index = open(tmp.path(), strategy);
        add_examples(&mut index);

        let err = index
            .add_entry("no matter", "never mind", EXAMPLE1_CONTENT, "")
            .unwrap_err();
        assert!(matches!(err, Error::AlreadyExists { .. }));

        index.close().unwrap();
    });
}

#[test]
fn reference_only_dedup_differs_by_strategy() {
    // Linear checks blob existence, which reference-only entries never
    // have; inverted checks its id map, which they are in.
    let tmp = tempfile::tempdir().unwrap();
    let mut index = open(tmp.path(), Strategy::Linear);
    index
        .add_entry(EXAMPLE3_FILENAME, EXAMPLE3_KEYWORDS, b"", "")
        .unwrap();
    index
        .add_entry(EXAMPLE3_FILENAME, EXAMPLE3_KEYWORDS, b"", "")
        .unwrap();
    index.close().unwrap();

    let tmp = tempfile::tempdir().unwrap();
    let mut index = open(tmp.path(), Strategy::Inverted);
    index
        .add_entry(EXAMPLE3_FILENAME, EXAMPLE3_KEYWORDS, b"", "")
        .unwrap();
    let err = index
        .add_entry(EXAMPLE3_FILENAME, EXAMPLE3_KEYWORDS, b"", "")
        .unwrap_err();
    assert!(matches!(err, Error::AlreadyExists { .. }));
    index.close().unwrap();
}

#[test]
fn separators_are_sanitized_and_roundtrip() {
    both_strategies(|strategy| {
        let tmp = tempfile::tempdir().unwrap();
        let mut index = open(tmp.path(), strategy);

        let entry = index
            .add_entry("weird|name.txt", "key\nwords|here", b"payload", "ex|tra")
            .unwrap();
        assert_eq!(entry.filename, "weird name.txt");
        assert_eq!(entry.keywords, "key words here");
        assert_eq!(entry.extra, "ex tra");
        index.close().unwrap();

        // Adjacent fields survive the round trip through the log.
        let index = open(tmp.path(), strategy);
        let results = index.search("words").unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].filename, "weird name.txt");
        assert_eq!(results[0].keywords, "key words here");
        assert_eq!(results[0].extra, "ex tra");
        index.close().unwrap();
    });
}

#[test]
fn invalid_entry_id_is_rejected() {
    let tmp = tempfile::tempdir().unwrap();
    let index = open(tmp.path(), Strategy::Linear);

    let non_hex = "g".repeat(64);
    let too_long = format!("{EXAMPLE1_ENTRY_ID}ff");
    for bad in [
        "",
        "short",
        "../../../../etc/passwd",
        non_hex.as_str(),
        too_long.as_str(),
    ] {
        let err = index.get_file(bad).unwrap_err();
        assert!(
            matches!(err, Error::InvalidIdentifier { .. }),
            "id {bad:?} should be invalid"
        );
    }
    index.close().unwrap();
}

#[test]
fn compressed_index_is_transparent() {
    let tmp = tempfile::tempdir().unwrap();
    let opts = IndexOptions {
        strategy: Strategy::Linear,
        compression: true,
    };

    let mut index = Index::open(tmp.path(), opts).unwrap();
    let big = vec![b'x'; 100_000];
    let entry = index.add_entry("big.bin", "big payload", &big, "").unwrap();
    index
        .add_entry(EXAMPLE1_FILENAME, EXAMPLE1_KEYWORDS, EXAMPLE1_CONTENT, "")
        .unwrap();
    index.close().unwrap();

    // The blob on disk is compressed, the facade view is not.
    let raw = std::fs::read(tmp.path().join(entry.entry_id.as_str())).unwrap();
    assert!(raw.len() < big.len());

    let index = Index::open(tmp.path(), opts).unwrap();
    assert_eq!(index.get_file(entry.entry_id.as_str()).unwrap(), big);
    assert_eq!(index.get_file(EXAMPLE1_ENTRY_ID).unwrap(), EXAMPLE1_CONTENT);
    index.close().unwrap();
}

#[test]
fn strategies_share_the_same_log_format() {
    // An index written by one strategy can be reopened by the other.
    let tmp = tempfile::tempdir().unwrap();
    let mut index = open(tmp.path(), Strategy::Linear);
    add_examples(&mut index);
    index.close().unwrap();

    let index = open(tmp.path(), Strategy::Inverted);
    assert_eq!(index.entry_count(), 3);
    let results = index.search("badwords").unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].entry_id.as_str(), EXAMPLE2_ENTRY_ID);
    index.close().unwrap();
}
