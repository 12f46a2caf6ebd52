//! Purpose: C ABI bridge for embedders (libcapsule).
//! Exports: C-callable capsule/sequence functions and error helpers.
//! Role: Stable ABI surface for non-Rust embedders in v0.
//! Invariants: Opaque handles; explicit free functions; 0/-1 return codes.
//! Invariants: Error kinds map 1:1 with core error kinds.
//! Notes: Handles are single-threaded; callers serialize access per handle.
#![allow(non_camel_case_types)]

use crate::api::{Capsule, Value, fill_indices};
use crate::core::error::{Error, ErrorKind};
use std::ffi::{CString, c_void};
use std::os::raw::c_char;
use std::ptr;
use tracing::trace;
use tracing_subscriber::EnvFilter;

#[repr(C)]
pub struct cpsl_capsule {
    capsule: Capsule,
}

#[repr(C)]
#[derive(Clone, Copy)]
pub struct cpsl_value {
    pub integer: i32,
    pub boolean: bool,
}

#[repr(C)]
pub struct cpsl_error {
    pub kind: i32,
    pub message: *mut c_char,
    pub requested: u64,
    pub capacity: u64,
    pub has_requested: u8,
    pub has_capacity: u8,
}

impl From<cpsl_value> for Value {
    fn from(value: cpsl_value) -> Self {
        Value::new(value.integer, value.boolean)
    }
}

impl From<Value> for cpsl_value {
    fn from(value: Value) -> Self {
        Self {
            integer: value.integer,
            boolean: value.boolean,
        }
    }
}

#[unsafe(no_mangle)]
pub extern "C" fn cpsl_capsule_new(
    value: cpsl_value,
    out_capsule: *mut *mut cpsl_capsule,
    out_err: *mut *mut cpsl_error,
) -> i32 {
    if out_capsule.is_null() {
        return fail(
            out_err,
            Error::new(ErrorKind::Usage).with_message("out_capsule is null"),
        );
    }
    let handle = Box::new(cpsl_capsule {
        capsule: Capsule::new(value.into()),
    });
    trace!(integer = value.integer, boolean = value.boolean, "capsule created");
    unsafe {
        *out_capsule = Box::into_raw(handle);
    }
    0
}

#[unsafe(no_mangle)]
pub extern "C" fn cpsl_capsule_free(capsule: *mut cpsl_capsule) {
    if capsule.is_null() {
        return;
    }
    trace!("capsule freed");
    unsafe {
        drop(Box::from_raw(capsule));
    }
}

#[unsafe(no_mangle)]
pub extern "C" fn cpsl_capsule_value(
    capsule: *const cpsl_capsule,
    out_value: *mut cpsl_value,
    out_err: *mut *mut cpsl_error,
) -> i32 {
    let capsule = match borrow_capsule_ref(capsule, out_err) {
        Ok(capsule) => capsule,
        Err(code) => return code,
    };
    if out_value.is_null() {
        return fail(
            out_err,
            Error::new(ErrorKind::Usage).with_message("out_value is null"),
        );
    }
    unsafe {
        *out_value = capsule.capsule.value().into();
    }
    0
}

#[unsafe(no_mangle)]
pub extern "C" fn cpsl_capsule_compute(
    capsule: *mut cpsl_capsule,
    operands: *const i32,
    len: usize,
    out_err: *mut *mut cpsl_error,
) -> i32 {
    let capsule = match borrow_capsule(capsule, out_err) {
        Ok(capsule) => capsule,
        Err(code) => return code,
    };
    let operands: &[i32] = if len == 0 {
        &[]
    } else {
        if operands.is_null() {
            return fail(
                out_err,
                Error::new(ErrorKind::Usage).with_message("operands is null"),
            );
        }
        unsafe { std::slice::from_raw_parts(operands, len) }
    };
    capsule.capsule.compute(operands);
    0
}

#[unsafe(no_mangle)]
pub extern "C" fn cpsl_capsule_set_callback(
    capsule: *mut cpsl_capsule,
    target: *mut c_void,
    action: Option<extern "C" fn(*mut c_void, i32)>,
    out_err: *mut *mut cpsl_error,
) -> i32 {
    let capsule = match borrow_capsule(capsule, out_err) {
        Ok(capsule) => capsule,
        Err(code) => return code,
    };
    match action {
        Some(action) if !target.is_null() => {
            capsule.capsule.arm(move |value| action(target, value));
        }
        _ => capsule.capsule.disarm(),
    }
    trace!(armed = capsule.capsule.is_armed(), "callback registration");
    0
}

#[unsafe(no_mangle)]
pub extern "C" fn cpsl_capsule_trigger(
    capsule: *mut cpsl_capsule,
    out_err: *mut *mut cpsl_error,
) -> i32 {
    let capsule = match borrow_capsule(capsule, out_err) {
        Ok(capsule) => capsule,
        Err(code) => return code,
    };
    capsule.capsule.trigger();
    0
}

#[unsafe(no_mangle)]
pub extern "C" fn cpsl_sequence_fill(
    buffer: *mut i64,
    len: usize,
    count: usize,
    out_err: *mut *mut cpsl_error,
) -> i32 {
    let buffer: &mut [i64] = if len == 0 {
        &mut []
    } else {
        if buffer.is_null() {
            return fail(
                out_err,
                Error::new(ErrorKind::Usage).with_message("buffer is null"),
            );
        }
        unsafe { std::slice::from_raw_parts_mut(buffer, len) }
    };
    match fill_indices(buffer, count) {
        Ok(()) => 0,
        Err(err) => fail(out_err, err),
    }
}

#[unsafe(no_mangle)]
pub extern "C" fn cpsl_error_free(err: *mut cpsl_error) {
    if err.is_null() {
        return;
    }
    unsafe {
        let err = Box::from_raw(err);
        if !err.message.is_null() {
            drop(CString::from_raw(err.message));
        }
    }
}

/// Installs a stderr subscriber honoring `RUST_LOG` so embedders can opt
/// into diagnostics. Safe to call more than once; later calls are no-ops.
#[unsafe(no_mangle)]
pub extern "C" fn cpsl_trace_init() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .try_init();
}

fn borrow_capsule<'a>(
    capsule: *mut cpsl_capsule,
    out_err: *mut *mut cpsl_error,
) -> Result<&'a mut cpsl_capsule, i32> {
    if capsule.is_null() {
        return Err(fail(
            out_err,
            Error::new(ErrorKind::InvalidHandle).with_message("capsule is null"),
        ));
    }
    unsafe { Ok(&mut *capsule) }
}

fn borrow_capsule_ref<'a>(
    capsule: *const cpsl_capsule,
    out_err: *mut *mut cpsl_error,
) -> Result<&'a cpsl_capsule, i32> {
    if capsule.is_null() {
        return Err(fail(
            out_err,
            Error::new(ErrorKind::InvalidHandle).with_message("capsule is null"),
        ));
    }
    unsafe { Ok(&*capsule) }
}

fn fail(out_err: *mut *mut cpsl_error, err: Error) -> i32 {
    if out_err.is_null() {
        return -1;
    }
    let error = Box::new(cpsl_error {
        kind: error_kind_code(err.kind()),
        message: to_c_string(err.message().unwrap_or("")),
        requested: err.requested().unwrap_or(0) as u64,
        capacity: err.capacity().unwrap_or(0) as u64,
        has_requested: if err.requested().is_some() { 1 } else { 0 },
        has_capacity: if err.capacity().is_some() { 1 } else { 0 },
    });
    unsafe {
        *out_err = Box::into_raw(error);
    }
    -1
}

fn to_c_string(input: &str) -> *mut c_char {
    CString::new(input)
        .map(|s| s.into_raw())
        .unwrap_or(ptr::null_mut())
}

fn error_kind_code(kind: ErrorKind) -> i32 {
    match kind {
        ErrorKind::Internal => 1,
        ErrorKind::Usage => 2,
        ErrorKind::Alloc => 3,
        ErrorKind::InvalidHandle => 4,
        ErrorKind::Bounds => 5,
    }
}
