use pagewise::{
    Error,
    core::db::memory::{MemoryDataset, MemorySelection},
    error::ErrorKind,
    prelude::*,
};

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
struct Track {
    id: u16,
    title: String,
}

impl Keyed for Track {
    type Key = u16;

    fn key(&self) -> Self::Key {
        self.id
    }
}

fn playlist(count: u16) -> MemoryDataset<Track> {
    (1..=count)
        .map(|id| Track {
            id,
            title: format!("track {id}"),
        })
        .collect()
}

#[test]
fn summary_serializes_for_callers() {
    let tracks = playlist(45);
    let session = DatasetSession::new(&tracks);

    let summary = session
        .summary(3, MemorySelection::<Track>::all())
        .expect("summary should resolve");
    let json = serde_json::to_value(summary).expect("summary should encode");

    assert_eq!(json["page"], 3);
    assert_eq!(json["page_count"], 3);
    assert_eq!(json["has_next"], false);
}

#[test]
fn session_errors_convert_to_public_error() {
    let mut session = DatasetSession::new(playlist(1));

    let err: Error = session
        .set_page_size(0)
        .expect_err("zero page size must be rejected")
        .into();

    assert_eq!(err.kind, ErrorKind::InvalidArgument);
    let json = serde_json::to_string(&err).expect("error should encode");
    assert!(json.contains("InvalidArgument"));
}

#[test]
fn version_matches_manifest() {
    assert_eq!(pagewise::VERSION, env!("CARGO_PKG_VERSION"));
    assert_eq!(pagewise::DEFAULT_PAGE_SIZE, PageSize::DEFAULT.get());
}
