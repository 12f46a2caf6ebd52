// Capsule state: an owned value pair plus a tagged callback slot.
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Value {
    pub integer: i32,
    pub boolean: bool,
}

impl Value {
    pub fn new(integer: i32, boolean: bool) -> Self {
        Self { integer, boolean }
    }
}

pub type Action = Box<dyn FnMut(i32)>;

enum Callback {
    Unarmed,
    Armed(Action),
}

pub struct Capsule {
    value: Value,
    callback: Callback,
}

impl Capsule {
    pub fn new(initial: Value) -> Self {
        Self {
            value: initial,
            callback: Callback::Unarmed,
        }
    }

    pub fn value(&self) -> Value {
        self.value
    }

    /// Overwrites the integer slot with the sum of `operands`; the boolean
    /// slot is untouched. An empty slice resets the integer to zero.
    /// Accumulation widens to i64; the result wraps on conversion back.
    pub fn compute(&mut self, operands: &[i32]) {
        let sum: i64 = operands.iter().map(|&operand| i64::from(operand)).sum();
        self.value.integer = sum as i32;
    }

    /// Arms the callback slot, replacing any prior action. The action carries
    /// its own captured context and observes the integer value current at
    /// trigger time.
    pub fn arm(&mut self, action: impl FnMut(i32) + 'static) {
        self.callback = Callback::Armed(Box::new(action));
    }

    pub fn disarm(&mut self) {
        self.callback = Callback::Unarmed;
    }

    pub fn is_armed(&self) -> bool {
        matches!(self.callback, Callback::Armed(_))
    }

    /// Invokes the armed action with the current integer value. A no-op while
    /// unarmed; never changes the arming state.
    pub fn trigger(&mut self) {
        let current = self.value.integer;
        if let Callback::Armed(action) = &mut self.callback {
            action(current);
        }
    }
}

impl fmt::Debug for Capsule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Capsule")
            .field("value", &self.value)
            .field("armed", &self.is_armed())
            .finish()
    }
}
