// Only enable jemalloc on non-Windows platforms when the jemalloc feature is enabled
#[cfg(all(not(target_env = "msvc"), feature = "jemalloc"))]
#[global_allocator]
static ALLOC: jemallocator::Jemalloc = jemallocator::Jemalloc;

use lazy_static::lazy_static;
use mpdc_response::presets::ENTRY_TOKENS;
use mpdc_response::{Block, MultiLine, Scanner};

#[cfg(all(not(target_env = "msvc"), feature = "jemalloc"))]
use jemalloc_ctl::{epoch, stats};
#[cfg(all(not(target_env = "msvc"), feature = "jemalloc"))]
use mpdc_response::presets::FILE_TOKENS;

lazy_static! {
    static ref LISTALLINFO: String = generate_listallinfo(2_000);
}

/// Runs `f` and returns its result with the bytes jemalloc still counts as
/// allocated afterwards, so anything `f` hands back is included.
///
/// Same epoch/`stats::allocated` reading as the lexer crate's memory tests.
#[cfg(all(not(target_env = "msvc"), feature = "jemalloc"))]
fn allocated_by<T>(f: impl FnOnce() -> T) -> (T, usize) {
    let e = epoch::mib().expect("Failed to get jemalloc epoch");
    let allocated = stats::allocated::mib().expect("Failed to get allocated mib");

    e.advance().expect("Failed to advance jemalloc epoch");
    let before = allocated.read().expect("Failed to read allocated memory");

    let result = f();

    e.advance().expect("Failed to advance jemalloc epoch");
    let after = allocated.read().expect("Failed to read allocated memory");

    (result, after.saturating_sub(before))
}

fn generate_listallinfo(songs: usize) -> String {
    let mut response = String::with_capacity(songs * 160);
    for i in 0..songs {
        if i % 50 == 0 {
            response.push_str(&format!("directory: album{:04}\n", i / 50));
            response.push_str("Last-Modified: 2024-05-01T12:00:00Z\n");
        }
        response.push_str(&format!("file: album{:04}/track{i:02}.flac\n", i / 50));
        response.push_str("Last-Modified: 2024-05-01T12:00:00Z\n");
        response.push_str(&format!("Time: {}\n", 120 + i % 300));
        response.push_str(&format!("Title: Track {i}\n"));
        response.push_str("Artist: Somebody\n");
    }
    response
}

#[cfg(all(not(target_env = "msvc"), feature = "jemalloc"))]
#[test]
fn test_counting_allocates_nothing() {
    let source: &str = &LISTALLINFO;
    let songs = MultiLine::new(FILE_TOKENS, ENTRY_TOKENS);

    let (records, materialized_mem) =
        allocated_by(|| Scanner::new(source, songs, Block::new).collect::<Vec<_>>());
    let (counted, counting_mem) = allocated_by(|| Scanner::counting(source, songs).count());

    println!("Materializing scanner memory usage: {} KB", materialized_mem / 1024);
    println!("Counting scanner memory usage: {} bytes", counting_mem);

    assert_eq!(counted, 2_000);
    assert_eq!(counted, records.len());
    // The measurement sees the record list, so it can see a regression too.
    assert!(
        materialized_mem >= records.len() * std::mem::size_of::<Block<'_>>(),
        "Materializing {} records measured only {materialized_mem} bytes",
        records.len()
    );
    // Other test threads allocate concurrently, so allow a page of noise.
    assert!(
        counting_mem < 4096,
        "Counting allocated {counting_mem} bytes"
    );
}

#[test]
fn test_scanning_does_not_copy_the_response() {
    let source: &str = &LISTALLINFO;
    let range = source.as_bytes().as_ptr_range();

    for block in Scanner::new(source, MultiLine::single(ENTRY_TOKENS), Block::new) {
        let start = block.as_str().as_ptr();
        assert!(range.contains(&start), "record was copied out of the response");
    }
}
