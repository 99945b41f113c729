use mpdc_response::presets::{self, ENTRY_TOKENS, FILE_TOKENS, LIST_SEPARATOR, PLAYLIST_TOKENS};
use mpdc_response::record::raw;
use mpdc_response::{
    count_records, Block, Direction, FullBlock, MultiLine, Position, ScanError, Scanner,
    SeparatorBounded, SingleLine, StreamAwareLine,
};
use pretty_assertions::assert_eq;

fn init_test_logger() {
    let _ = env_logger::builder()
        .is_test(true)
        .filter_level(log::LevelFilter::Trace)
        .try_init();
}

const LISTALL: &str = "\
directory: jazz
Last-Modified: 2023-11-02T10:00:00Z
file: jazz/so_what.flac
Last-Modified: 2023-11-02T10:00:00Z
Time: 562
Artist: Miles Davis
Title: So What
file: jazz/blue_in_green.flac
Time: 337
directory: rock
playlist: rock/best.m3u
file: rock/paranoid.ogg
Title: Paranoid
";

#[test]
fn test_full_block_counts_terminated_lines() {
    init_test_logger();
    for n in 0..5 {
        let text: String = (0..n).map(|i| format!("key{i}: value\n")).collect();
        let records: Vec<_> = Scanner::new(&text, FullBlock::new(), raw).collect();
        assert_eq!(records.len(), n);
        assert_eq!(count_records(&text, FullBlock::new()), n);
    }
}

#[test]
fn test_songs_end_at_any_entry() {
    init_test_logger();
    let songs: Vec<Block<'_>> = presets::songs(LISTALL).collect();
    assert_eq!(songs.len(), 3);
    assert_eq!(songs[0].name(), Some("jazz/so_what.flac"));
    assert_eq!(songs[0].get("Title"), Some("So What"));
    assert_eq!(songs[1].as_str(), "file: jazz/blue_in_green.flac\nTime: 337\n");
    assert_eq!(songs[2].get("Title"), Some("Paranoid"));
}

#[test]
fn test_entries_walk_backward_from_end() {
    init_test_logger();
    let mut scanner = Scanner::with_position(
        LISTALL,
        MultiLine::single(ENTRY_TOKENS),
        Block::new,
        LISTALL.len() as isize,
    )
    .unwrap();

    let mut kinds = Vec::new();
    while scanner.has_previous() {
        kinds.push(scanner.previous_record().unwrap().kind().unwrap());
    }
    assert_eq!(
        kinds,
        vec!["file", "playlist", "directory", "file", "file", "directory"]
    );
    assert_eq!(scanner.position(), Position::Offset(0));
}

#[test]
fn test_playlists_ignore_other_keys() {
    init_test_logger();
    let text = "playlist: chill\nLast-Modified: 2024-02-01T00:00:00Z\nplaylist: focus\nLast-Modified: 2024-03-01T00:00:00Z\n";
    let mut scanner = presets::playlists(text);
    assert_eq!(scanner.next_record().unwrap().name(), Some("chill"));
    assert_eq!(scanner.next_record().unwrap().name(), Some("focus"));
    assert_eq!(scanner.previous_record().unwrap().name(), Some("focus"));
    assert_eq!(
        count_records(text, SingleLine::new(PLAYLIST_TOKENS)),
        2
    );
}

#[test]
fn test_stream_marker_only_skips_exact_value() {
    init_test_logger();
    let text = "file: a.flac\nfile: http\nfile: https://radio.example/stream\n";
    let names: Vec<_> = Scanner::new(text, StreamAwareLine::new(FILE_TOKENS, "http"), Block::new)
        .filter_map(|block| block.name())
        .collect();
    assert_eq!(names, vec!["a.flac", "https://radio.example/stream"]);
}

#[test]
fn test_command_list_sub_results() {
    init_test_logger();
    let text = "key: v\nlist_OK\nkey2: v2\n";
    let mut scanner = Scanner::new(text, SeparatorBounded::new(LIST_SEPARATOR), raw);
    assert_eq!(scanner.next_record(), Ok("key: v\n"));
    assert_eq!(scanner.next_record(), Ok("key2: v2\n"));
    assert_eq!(
        scanner.next_record(),
        Err(ScanError::Exhausted {
            direction: Direction::Forward
        })
    );
    assert!(!scanner.has_next());
    assert!(!scanner.has_next());
}

#[test]
fn test_command_list_with_trailing_separator() {
    init_test_logger();
    let text = "volume: 40\nlist_OK\nsongid: 7\nlist_OK\n";
    let forward: Vec<_> = presets::command_list(text).collect();
    assert_eq!(forward, vec!["volume: 40\n", "songid: 7\n"]);

    let mut scanner =
        Scanner::with_position(text, SeparatorBounded::new(LIST_SEPARATOR), raw, text.len() as isize)
            .unwrap();
    assert_eq!(scanner.previous_record(), Ok("songid: 7\n"));
    assert_eq!(scanner.previous_record(), Ok("volume: 40\n"));
    assert_eq!(scanner.position(), Position::BeforeStart);
}

#[test]
fn test_record_factory_called_once_per_record() {
    init_test_logger();
    let mut calls = 0;
    let scanner = Scanner::new(LISTALL, MultiLine::single(ENTRY_TOKENS), |text: &str| {
        calls += 1;
        text.len()
    });
    let total: usize = scanner.sum();
    assert_eq!(calls, 6);
    let first_entry = LISTALL.find("directory").unwrap();
    assert_eq!(total, LISTALL.len() - first_entry);
}

#[test]
fn test_has_next_is_idempotent_after_exhaustion() {
    init_test_logger();
    let mut scanner = presets::lines("OK\n");
    assert_eq!(scanner.next_record(), Ok("OK\n"));
    assert!(scanner.next_record().is_err());
    for _ in 0..3 {
        assert!(!scanner.has_next());
        assert_eq!(scanner.next_index(), None);
    }
}
