use std::fs;
use std::io::Cursor;
use std::path::Path;
use std::sync::Arc;

use block_dev::{BLOCK_SIZE, BlockDevice, BlockId, Error, NUM_BLOCKS, Session};
use memfs::{Confirm, Destination, Retrieved, Strategy};
use tempfile::tempdir;

use crate::{BlockFile, Prompt};

fn session(image: &Path) -> Session {
    Session::open(Arc::new(BlockFile::new(image))).unwrap()
}

#[test]
fn image_is_created_with_full_size() {
    let dir = tempdir().unwrap();
    let image = dir.path().join("memdrv.img");

    session(&image).close().unwrap();
    let len = fs::metadata(&image).unwrap().len();
    assert_eq!(len, (NUM_BLOCKS * BLOCK_SIZE) as u64);
}

#[test]
fn blocks_survive_sessions() {
    let dir = tempdir().unwrap();
    let image = dir.path().join("memdrv.img");

    let mut first = session(&image);
    first.write_block(BlockId::new(5), &[0x5a; BLOCK_SIZE]).unwrap();
    first.close().unwrap();

    let second = session(&image);
    let mut buf = [0; BLOCK_SIZE];
    second.read_block(BlockId::new(5), &mut buf).unwrap();
    assert_eq!(buf, [0x5a; BLOCK_SIZE]);
    second.read_block(BlockId::new(6), &mut buf).unwrap();
    assert_eq!(buf, [0; BLOCK_SIZE]);
    second.close().unwrap();
}

#[test]
fn lifecycle_errors() {
    let dir = tempdir().unwrap();
    let dev = BlockFile::new(dir.path().join("memdrv.img"));
    let mut buf = [0; BLOCK_SIZE];

    assert!(matches!(
        dev.read_block(BlockId::INODE, &mut buf),
        Err(Error::NotOpen)
    ));
    dev.open().unwrap();
    assert!(matches!(dev.open(), Err(Error::AlreadyOpen)));
    assert!(matches!(
        dev.write_block(BlockId::new(NUM_BLOCKS), &buf),
        Err(Error::OutOfRange { .. })
    ));
    dev.close().unwrap();
    assert!(matches!(dev.close(), Err(Error::NotOpen)));
    assert!(matches!(
        dev.write_block(BlockId::INODE, &buf),
        Err(Error::NotOpen)
    ));
}

#[test]
fn store_then_retrieve_across_processes() {
    let dir = tempdir().unwrap();
    let image = dir.path().join("memdrv.img");
    let source = dir.path().join("source.txt");
    let target = dir.path().join("target.txt");
    let data: Vec<u8> = (0..(20 * BLOCK_SIZE)).map(|i| (i % 251) as u8).collect();
    fs::write(&source, &data).unwrap();

    let mut store = session(&image);
    let report = memfs::store_file(&mut store, &source, Strategy::Random).unwrap();
    assert_eq!(report.size as usize, data.len());
    assert!(report.indirect.is_some());
    store.close().unwrap();

    let retrieve = session(&image);
    let mut prompt = Prompt::new(Cursor::new(""), Vec::new());
    let retrieved =
        memfs::retrieve_to(&retrieve, &Destination::Path(target.clone()), &mut prompt).unwrap();
    assert_eq!(
        retrieved,
        Retrieved::Written {
            blocks: 20,
            bytes: data.len() as u64
        }
    );
    retrieve.close().unwrap();
    assert_eq!(fs::read(&target).unwrap(), data);
    assert!(prompt.into_inner().1.is_empty());
}

#[test]
fn failed_store_still_closes_image() {
    let dir = tempdir().unwrap();
    let dev = Arc::new(BlockFile::new(dir.path().join("memdrv.img")));
    let missing = dir.path().join("missing.txt");

    let err = Session::run(dev.clone(), |session| {
        memfs::store_file(session, &missing, Strategy::Sequential)
    })
    .unwrap_err();
    assert!(matches!(err, memfs::Error::Source { .. }));

    dev.open().unwrap();
    dev.close().unwrap();
}

#[test]
fn clear_image() {
    let dir = tempdir().unwrap();
    let image = dir.path().join("memdrv.img");
    fs::write(&image, vec![0xff; NUM_BLOCKS * BLOCK_SIZE]).unwrap();

    let mut session = session(&image);
    memfs::clear(&mut session).unwrap();
    session.close().unwrap();
    assert!(fs::read(&image).unwrap().iter().all(|&b| b == 0));
}

#[test]
fn prompt_answers() {
    let path = Path::new("out.bin");
    let ask = |input: &str| {
        let mut prompt = Prompt::new(Cursor::new(input.to_owned()), Vec::new());
        let answer = prompt.confirm_overwrite(path).unwrap();
        (answer, String::from_utf8(prompt.into_inner().1).unwrap())
    };

    let (answer, output) = ask("y\n");
    assert!(answer);
    assert_eq!(output, "File exists, do you want to overwrite out.bin (Y/N)? ");

    assert!(ask("Y\n").0);
    assert!(!ask("n\n").0);
    assert!(ask("what\n  \nY\n").0);
    assert!(!ask("ok\n").0);
    assert!(!ask("").0);
}
