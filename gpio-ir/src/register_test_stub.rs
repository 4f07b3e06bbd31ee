extern crate alloc;
extern crate std;

use alloc::collections::VecDeque;
use core::cell::{Cell, RefCell};
use embedded_hal::digital::{Error, ErrorKind, ErrorType, InputPin};
use std::rc::Rc;
use std::vec::Vec;

use crate::register::GpioRegister;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TestError;

#[derive(Debug, Default)]
struct FakeRegisterInner {
    queue: VecDeque<Result<u32, TestError>>,
    value: u32,
    minors: Vec<u8>,
}

/// A register the test controls. Queued results are returned first; once the queue is empty every
/// read returns the current value, like a latch that holds its state.
#[derive(Debug, Clone, Default)]
pub struct FakeRegister(Rc<RefCell<FakeRegisterInner>>);
impl FakeRegister {
    pub fn new(value: u32) -> Self {
        let me = Self::default();
        me.set(value);
        me
    }

    /// Change the latched value and drop anything queued.
    pub fn set(&self, value: u32) {
        let mut inner = self.0.borrow_mut();
        inner.queue.clear();
        inner.value = value;
    }

    pub fn push(&self, value: u32) {
        self.0.borrow_mut().queue.push_back(Ok(value));
    }

    pub fn push_failure(&self) {
        self.0.borrow_mut().queue.push_back(Err(TestError));
    }

    pub fn read_count(&self) -> usize {
        self.0.borrow().minors.len()
    }

    pub fn minors(&self) -> Vec<u8> {
        self.0.borrow().minors.clone()
    }
}

impl GpioRegister for FakeRegister {
    type Error = TestError;

    fn read(&mut self, minor: u8) -> Result<u32, TestError> {
        let mut inner = self.0.borrow_mut();
        inner.minors.push(minor);
        match inner.queue.pop_front() {
            Some(result) => result,
            None => Ok(inner.value),
        }
    }
}

struct PinShared {
    n: u8,
    /// `None` makes reads fail.
    level: Cell<Option<bool>>,
}

/// An input pin whose level the test drives.
#[derive(Clone)]
pub struct Pin(Rc<PinShared>);
impl core::fmt::Debug for Pin {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Pin")
            .field("n", &self.0.n)
            .field("level", &self.0.level.get())
            .finish()
    }
}
impl Pin {
    pub fn new(n: u8) -> Self {
        Self(Rc::new(PinShared {
            n,
            level: Cell::new(Some(false)),
        }))
    }

    pub fn num(&self) -> u8 {
        self.0.n
    }

    pub fn drive(&self, is_high: bool) {
        self.0.level.set(Some(is_high));
    }

    pub fn fault(&self) {
        self.0.level.set(None);
    }
}

impl Error for TestError {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Other
    }
}

impl ErrorType for Pin {
    type Error = TestError;
}

impl InputPin for Pin {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        self.0.level.get().ok_or(TestError)
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        self.0.level.get().map(|high| !high).ok_or(TestError)
    }
}
