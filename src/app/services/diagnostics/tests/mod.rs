//! Shared test utilities for diagnostics tests

use crate::app::models::{Record, RecordKind};
use std::cell::RefCell;
use std::io::{self, Write};
use std::rc::Rc;

pub mod reporter_tests;

/// Cloneable in-memory sink so a test can read what a writer produced
#[derive(Clone, Default)]
pub struct SharedBuffer(Rc<RefCell<Vec<u8>>>);

impl SharedBuffer {
    pub fn contents(&self) -> String {
        String::from_utf8(self.0.borrow().clone()).unwrap()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// QSO record holding the given fields, all on line 1
pub fn record_with(fields: &[(&str, &str)]) -> Record {
    let mut record = Record::new(RecordKind::Qso);
    for (name, value) in fields {
        record.insert(name, *value, 1);
    }
    record
}
