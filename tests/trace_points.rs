use std::io::Cursor;
use std::sync::Mutex;

use log::{Level, LevelFilter, Log, Metadata, Record};
use ring_pipe_reader::{PipeReaderError, ReadSource, RingBufferReader};

/// Keeps every record emitted by this crate.
struct Capture {
    records: Mutex<Vec<(Level, String)>>,
}

impl Log for Capture {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.target().starts_with("ring_pipe_reader")
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            self.records
                .lock()
                .unwrap()
                .push((record.level(), record.args().to_string()));
        }
    }

    fn flush(&self) {}
}

static CAPTURE: Capture = Capture {
    records: Mutex::new(Vec::new()),
};

fn take_records() -> Vec<(Level, String)> {
    std::mem::take(&mut *CAPTURE.records.lock().unwrap())
}

// the logger is process wide, so everything runs in a single test
#[test]
fn every_read_is_traced_and_invalid_reads_are_warned() {
    log::set_logger(&CAPTURE).unwrap();
    log::set_max_level(LevelFilter::Trace);

    let stream: Vec<u8> = (0..32).collect();
    let source = ReadSource::new(Cursor::new(stream.clone()));
    let mut reader = RingBufferReader::with_source(source, 16).unwrap();

    let mut buf = [0u8; 16];
    reader.pread(&mut buf, 0).unwrap();
    reader.pread(&mut buf[..8], 8).unwrap();
    reader.pread(&mut buf, 16).unwrap();
    assert_eq!(&buf[..], &stream[16..]);
    assert_eq!(
        take_records(),
        vec![
            (Level::Debug, "core read 16 bytes at 0 (current offset 0)".to_string()),
            (Level::Debug, "core read 8 bytes at 8 (current offset 16)".to_string()),
            (Level::Debug, "core read 16 bytes at 16 (current offset 16)".to_string()),
        ]
    );

    let err = reader.pread(&mut buf[..4], 4).unwrap_err();
    assert!(matches!(err, PipeReaderError::OutOfWindow { .. }));
    assert_eq!(
        take_records(),
        vec![
            (Level::Debug, "core read 4 bytes at 4 (current offset 32)".to_string()),
            (Level::Warn, "invalid read of 4 bytes at 4 (current offset 32)".to_string()),
        ]
    );

    // logging does not change what is served
    reader.pread(&mut buf[..4], 28).unwrap();
    assert_eq!(&buf[..4], &stream[28..]);
    assert_eq!(take_records().len(), 1);
}
