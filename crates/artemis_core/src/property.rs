//! # Timestamped Properties
//!
//! Every field of a world object is a [`Property`]: a value and the time it
//! was observed, behind its own lock.
//!
//! ## Unspecified Values
//!
//! A property that has never been reported holds a sentinel chosen per type.
//! [`Property::has_value`] compares against that sentinel; there is no
//! separate flag that could disagree with the value.
//!
//! | type         | sentinel             |
//! |--------------|----------------------|
//! | `f32`        | `NaN`                |
//! | `i32`        | `i32::MIN`           |
//! | `i8`, `i16`  | `-1`                 |
//! | `BoolState`  | `BoolState::Unknown` |
//! | `Option<T>`  | `None`               |
//!
//! ## Merging
//!
//! [`Property::update_from`] copies value and timestamp only if the source
//! has a value and is at least as new as the destination. The source is read
//! under its own lock, which is released before the destination is locked,
//! so two properties are never locked at once.

use std::fmt;

use artemis_shared::BoolState;
use parking_lot::Mutex;

/// A type that can live in a [`Property`].
pub trait PropertyValue: Clone + fmt::Debug + Send + 'static {
    /// The "never reported" sentinel.
    fn unspecified() -> Self;

    /// Returns true unless `self` is the sentinel.
    fn is_specified(&self) -> bool;
}

impl PropertyValue for f32 {
    fn unspecified() -> Self {
        f32::NAN
    }

    fn is_specified(&self) -> bool {
        !self.is_nan()
    }
}

impl PropertyValue for i32 {
    fn unspecified() -> Self {
        i32::MIN
    }

    fn is_specified(&self) -> bool {
        *self != i32::MIN
    }
}

impl PropertyValue for i16 {
    fn unspecified() -> Self {
        -1
    }

    fn is_specified(&self) -> bool {
        *self != -1
    }
}

impl PropertyValue for i8 {
    fn unspecified() -> Self {
        -1
    }

    fn is_specified(&self) -> bool {
        *self != -1
    }
}

impl PropertyValue for BoolState {
    fn unspecified() -> Self {
        BoolState::Unknown
    }

    fn is_specified(&self) -> bool {
        self.is_known()
    }
}

impl<T: Clone + fmt::Debug + Send + 'static> PropertyValue for Option<T> {
    fn unspecified() -> Self {
        None
    }

    fn is_specified(&self) -> bool {
        self.is_some()
    }
}

#[derive(Clone, Debug)]
struct Cell<V> {
    value: V,
    timestamp: u64,
}

/// A value and the time it was last observed.
pub struct Property<V: PropertyValue> {
    cell: Mutex<Cell<V>>,
}

impl<V: PropertyValue> Property<V> {
    /// Creates an unspecified property stamped with `timestamp`.
    #[must_use]
    pub fn new(timestamp: u64) -> Self {
        Self::with_value(V::unspecified(), timestamp)
    }

    /// Creates a property holding `value`.
    #[must_use]
    pub fn with_value(value: V, timestamp: u64) -> Self {
        Self {
            cell: Mutex::new(Cell { value, timestamp }),
        }
    }

    /// Current value, or the sentinel.
    #[must_use]
    pub fn value(&self) -> V {
        self.cell.lock().value.clone()
    }

    /// Time the current value was observed.
    #[must_use]
    pub fn timestamp(&self) -> u64 {
        self.cell.lock().timestamp
    }

    /// Value and timestamp read together.
    #[must_use]
    pub fn snapshot(&self) -> (V, u64) {
        let cell = self.cell.lock();
        (cell.value.clone(), cell.timestamp)
    }

    /// Returns true if a value has been reported.
    #[must_use]
    pub fn has_value(&self) -> bool {
        self.cell.lock().value.is_specified()
    }

    /// Unconditionally replaces value and timestamp.
    pub fn set(&self, value: V, timestamp: u64) {
        *self.cell.lock() = Cell { value, timestamp };
    }

    /// Sets the value if one was decoded.
    ///
    /// Builders hold `Option`s of the decoded wire value; `None` leaves the
    /// property untouched.
    pub fn put<T: Into<V>>(&self, value: Option<T>, timestamp: u64) {
        if let Some(value) = value {
            self.set(value.into(), timestamp);
        }
    }

    /// Newest-wins copy from `other`. Returns true if the value was taken.
    pub fn update_from(&self, other: &Self) -> bool {
        if std::ptr::eq(self, other) {
            return false;
        }
        let incoming = other.cell.lock().clone();
        if !incoming.value.is_specified() {
            return false;
        }
        let mut cell = self.cell.lock();
        if incoming.timestamp < cell.timestamp {
            return false;
        }
        *cell = incoming;
        true
    }
}

impl<V: PropertyValue> Clone for Property<V> {
    fn clone(&self) -> Self {
        let (value, timestamp) = self.snapshot();
        Self::with_value(value, timestamp)
    }
}

impl<V: PropertyValue> fmt::Debug for Property<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (value, timestamp) = self.snapshot();
        if value.is_specified() {
            write!(f, "{value:?}@{timestamp}")
        } else {
            write!(f, "-@{timestamp}")
        }
    }
}
