//! Access and rank over file-backed trees

mod utils;

use utils::{Fixture, sym};
use wavelet_tree::{BitmapStore, WaveletError};

const TEST_SEQUENCE: &str = "abacaba";

#[test]
fn test_access() {
    let fixture = Fixture::with_contents(TEST_SEQUENCE.as_bytes());
    let tree = fixture.build();

    let expected = ['a', 'b', 'a', 'c', 'a', 'b', 'a'];
    for (i, &c) in expected.iter().enumerate() {
        assert_eq!(tree.access(i).unwrap(), sym(c), "access({i})");
    }
}

#[test]
fn test_rank() {
    let fixture = Fixture::with_contents(TEST_SEQUENCE.as_bytes());
    let tree = fixture.build();

    let a_ranks = [1, 1, 2, 2, 3, 3, 4];
    for (i, &r) in a_ranks.iter().enumerate() {
        assert_eq!(tree.rank(sym('a'), i).unwrap(), r, "rank('a', {i})");
    }

    assert_eq!(tree.rank(sym('b'), 0).unwrap(), 0);
    assert_eq!(tree.rank(sym('b'), 1).unwrap(), 1);
    assert_eq!(tree.rank(sym('b'), 5).unwrap(), 2);

    assert_eq!(tree.rank(sym('c'), 3).unwrap(), 1);
    assert_eq!(tree.rank(sym('c'), 6).unwrap(), 1);
}

#[test]
fn test_boundaries() {
    let fixture = Fixture::with_contents(TEST_SEQUENCE.as_bytes());
    let tree = fixture.build();

    assert_eq!(tree.len(), 7);
    assert!(matches!(
        tree.access(7),
        Err(WaveletError::IndexOutOfBounds { index: 7, len: 7 })
    ));
    assert!(matches!(
        tree.rank(sym('a'), 7),
        Err(WaveletError::IndexOutOfBounds { index: 7, len: 7 })
    ));
    assert!(tree.access(usize::MAX).is_err());
}

#[test]
fn test_single_char_sequence() {
    let single = "aaaaaa";
    let fixture = Fixture::with_contents(single.as_bytes());
    let tree = fixture.build();

    for i in 0..single.len() {
        assert_eq!(tree.access(i).unwrap(), sym('a'));
    }

    assert_eq!(tree.rank(sym('a'), 0).unwrap(), 1);
    assert_eq!(tree.rank(sym('a'), 5).unwrap(), 6);
    assert_eq!(tree.rank(sym('b'), 5).unwrap(), 0);

    // a lone leaf needs no bitmap
    assert_eq!(tree.stats().nodes, 1);
    assert_eq!(tree.store().used(), 0);
}

#[test]
fn test_symbols_outside_range_rank_zero() {
    let fixture = Fixture::with_contents(b"mmnnoo");
    let tree = fixture.build();

    assert_eq!(tree.rank(sym('a'), 5).unwrap(), 0);
    assert_eq!(tree.rank(sym('z'), 5).unwrap(), 0);
    assert_eq!(tree.count(sym('n')).unwrap(), 2);
}

#[test]
fn test_sparse_alphabet() {
    // gaps in the symbol range leave some children absent
    let data = b"a z a q a z";
    let fixture = Fixture::with_contents(data);
    let tree = fixture.build();

    for (i, &b) in data.iter().enumerate() {
        assert_eq!(tree.access(i).unwrap(), u16::from(b));
    }
    for absent in ['b', 'm', 'p', 'r', 'y'] {
        assert_eq!(tree.count(sym(absent)).unwrap(), 0, "count({absent})");
    }
    assert_eq!(tree.count(sym('a')).unwrap(), 3);
    assert_eq!(tree.count(sym(' ')).unwrap(), 5);
    assert_eq!(tree.rank(sym('z'), 2).unwrap(), 1);
}

#[test]
fn test_backing_file_is_created_with_capacity() {
    let fixture = Fixture::with_contents(TEST_SEQUENCE.as_bytes());
    let config = fixture.config();
    let tree = fixture.build();

    let meta = std::fs::metadata(&config.backing_path).unwrap();
    assert_eq!(meta.len(), config.capacity as u64);
    assert_eq!(tree.store().path(), config.backing_path.as_path());
    tree.store().sync().unwrap();
}

#[test]
fn test_storage_exhaustion() {
    let data: Vec<u8> = (0..4096u32).map(|i| b'a' + (i % 26) as u8).collect();
    let fixture = Fixture::with_contents(&data);
    let config = fixture.config().capacity(64);

    let sequence = wavelet_tree::MappedSequence::open(&fixture.data_path).unwrap();
    let err = wavelet_tree::WaveletTree::build(&sequence, &config).unwrap_err();
    assert!(matches!(err, WaveletError::StorageExhausted { .. }), "{err}");
}

#[test]
fn test_live_tree_keeps_its_backing_file() {
    let fixture = Fixture::with_contents(TEST_SEQUENCE.as_bytes());
    let tree = fixture.build();
    let before: Vec<u16> = (0..tree.len()).map(|i| tree.access(i).unwrap()).collect();

    let other_path = fixture.dir.path().join("other.txt");
    std::fs::write(&other_path, "zzzzzzzzzzzzzzzzzyxwvu").unwrap();
    let other = wavelet_tree::MappedSequence::open(&other_path).unwrap();

    let err = wavelet_tree::WaveletTree::build(&other, &fixture.config()).unwrap_err();
    assert!(matches!(err, WaveletError::Io { .. }), "{err}");

    let after: Vec<u16> = (0..tree.len()).map(|i| tree.access(i).unwrap()).collect();
    assert_eq!(before, after);
    assert_eq!(tree.rank(sym('c'), 6).unwrap(), 1);

    // the backing file is free again once the first tree is gone
    drop(tree);
    let rebuilt = wavelet_tree::WaveletTree::build(&other, &fixture.config()).unwrap();
    assert_eq!(rebuilt.count(sym('z')).unwrap(), 17);
}
