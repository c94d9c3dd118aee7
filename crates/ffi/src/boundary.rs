//! Engine-generic halves of the exported functions.
//!
//! The `extern "C"` functions in the crate root fix the engine to Typst and
//! forward here. Keeping these generic lets the ownership rules be exercised
//! with any [`TypesetEngine`].
//!
//! # Ownership
//!
//! - A world is created by [`world_new`] as a leaked `Box` and reclaimed by
//!   [`world_free`]. Nothing else frees it.
//! - A successful compile hands out a leaked boxed slice, reclaimed by
//!   [`result_free`] with the same pointer and length.
//! - Custom fonts, the source and the directory paths are copied or only
//!   borrowed for the duration of the call; the caller keeps ownership.

use crate::error::FfiError;
use folio_core::{CompileRequest, FontData, TypesetEngine, World};
use std::panic::{self, AssertUnwindSafe};
use std::path::PathBuf;
use std::{ptr, slice};

/// Status of a successful compile.
pub const FOLIO_OK: i32 = 0;
/// Status of a failed compile. Every failure kind maps to this value.
pub const FOLIO_ERROR: i32 = 1;

/// Outcome of one compile, as seen from C.
///
/// On success `data`/`len` describe a buffer owned by the caller, to be
/// released with `folio_result_free`. On failure `data` is null and `len` is 0.
#[repr(C)]
#[derive(Debug)]
pub struct FolioResult {
    pub data: *mut u8,
    pub len: usize,
    pub error: i32,
}

impl FolioResult {
    fn success(output: Vec<u8>) -> Self {
        let boxed = output.into_boxed_slice();
        let len = boxed.len();
        let data = Box::into_raw(boxed).cast::<u8>();
        Self {
            data,
            len,
            error: FOLIO_OK,
        }
    }

    fn failure() -> Self {
        Self {
            data: ptr::null_mut(),
            len: 0,
            error: FOLIO_ERROR,
        }
    }

    pub fn is_ok(&self) -> bool {
        self.error == FOLIO_OK
    }

    /// Views the output buffer. Empty for failures.
    ///
    /// # Safety
    /// The result must not have been released yet.
    pub unsafe fn bytes(&self) -> &[u8] {
        if self.data.is_null() {
            return &[];
        }
        unsafe { slice::from_raw_parts(self.data, self.len) }
    }
}

/// Borrows `len` bytes at `ptr`; null or zero length reads as absent.
unsafe fn optional_bytes<'a>(ptr: *const u8, len: usize) -> Option<&'a [u8]> {
    if ptr.is_null() || len == 0 {
        None
    } else {
        Some(unsafe { slice::from_raw_parts(ptr, len) })
    }
}

/// Copies the custom fonts out of the caller's arrays.
///
/// A null array or zero count means no custom fonts. Individual null or empty
/// entries are skipped.
unsafe fn read_fonts(
    font_ptrs: *const *const u8,
    font_lens: *const usize,
    font_count: usize,
) -> Vec<FontData> {
    if font_count == 0 || font_ptrs.is_null() || font_lens.is_null() {
        return Vec::new();
    }

    let ptrs = unsafe { slice::from_raw_parts(font_ptrs, font_count) };
    let lens = unsafe { slice::from_raw_parts(font_lens, font_count) };

    let mut fonts = Vec::with_capacity(font_count);
    for (index, (&data, &len)) in ptrs.iter().zip(lens).enumerate() {
        match unsafe { optional_bytes(data, len) } {
            Some(bytes) => fonts.push(FontData::copy_from_slice(bytes)),
            None => log::debug!("Skipping empty custom font entry #{index}"),
        }
    }
    fonts
}

#[cfg(unix)]
fn path_from_bytes(bytes: &[u8], _kind: &'static str) -> Result<PathBuf, FfiError> {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;
    Ok(PathBuf::from(OsStr::from_bytes(bytes)))
}

#[cfg(not(unix))]
fn path_from_bytes(bytes: &[u8], kind: &'static str) -> Result<PathBuf, FfiError> {
    std::str::from_utf8(bytes)
        .map(PathBuf::from)
        .map_err(|_| FfiError::InvalidPath { kind })
}

/// Reads an optional directory argument. Null or zero length means disabled.
unsafe fn read_dir(ptr: *const u8, len: usize, kind: &'static str) -> Result<Option<PathBuf>, FfiError> {
    unsafe { optional_bytes(ptr, len) }
        .map(|bytes| path_from_bytes(bytes, kind))
        .transpose()
}

/// Builds a world from the engine's builtin fonts plus the custom fonts.
///
/// Returns null if the engine panics while preparing its fonts.
///
/// # Safety
/// When `font_count > 0` and both arrays are non-null, they must each hold
/// `font_count` elements, and every non-null `font_ptrs[i]` must point to
/// `font_lens[i]` readable bytes. The bytes are copied before this returns.
pub unsafe fn world_new<E: TypesetEngine>(
    engine: E,
    font_ptrs: *const *const u8,
    font_lens: *const usize,
    font_count: usize,
) -> *mut World<E> {
    let fonts = unsafe { read_fonts(font_ptrs, font_lens, font_count) };

    let built = panic::catch_unwind(AssertUnwindSafe(move || {
        World::builder(engine).with_fonts(fonts).build()
    }));

    match built {
        Ok(world) => Box::into_raw(Box::new(world)),
        Err(payload) => {
            log::error!("World construction failed: {}", FfiError::from_panic(&*payload));
            ptr::null_mut()
        }
    }
}

/// Compiles one source against a world.
///
/// # Safety
/// - `world` must be null or a live pointer returned by [`world_new`].
/// - `source_ptr` must point to `source_len` readable bytes (or be null with
///   `source_len == 0`).
/// - `root_ptr`/`pkg_ptr` must each be null or point to as many readable
///   bytes as their length says.
pub unsafe fn world_compile<E: TypesetEngine>(
    world: *const World<E>,
    source_ptr: *const u8,
    source_len: usize,
    root_ptr: *const u8,
    root_len: usize,
    pkg_ptr: *const u8,
    pkg_len: usize,
) -> FolioResult {
    let outcome = unsafe {
        try_compile(world, source_ptr, source_len, root_ptr, root_len, pkg_ptr, pkg_len)
    };
    match outcome {
        Ok(output) => FolioResult::success(output),
        Err(err) => {
            log::warn!("Compile failed at the C boundary: {err}");
            FolioResult::failure()
        }
    }
}

unsafe fn try_compile<E: TypesetEngine>(
    world: *const World<E>,
    source_ptr: *const u8,
    source_len: usize,
    root_ptr: *const u8,
    root_len: usize,
    pkg_ptr: *const u8,
    pkg_len: usize,
) -> Result<Vec<u8>, FfiError> {
    let world = unsafe { world.as_ref() }.ok_or(FfiError::NullWorld)?;

    let source: &[u8] = match unsafe { optional_bytes(source_ptr, source_len) } {
        Some(source) => source,
        None if source_len == 0 => &[],
        None => return Err(FfiError::NullSource(source_len)),
    };

    let mut request = CompileRequest::new(source);
    if let Some(root) = unsafe { read_dir(root_ptr, root_len, "Root") }? {
        request = request.with_root(root);
    }
    if let Some(cache) = unsafe { read_dir(pkg_ptr, pkg_len, "Package cache") }? {
        request = request.with_package_cache(cache);
    }

    panic::catch_unwind(AssertUnwindSafe(|| world.compile(&request)))
        .map_err(|payload| FfiError::from_panic(&*payload))?
        .map_err(FfiError::from)
}

/// Releases a world. Null is a no-op.
///
/// # Safety
/// `world` must be null or a pointer from [`world_new`] not yet released.
pub unsafe fn world_free<E: TypesetEngine>(world: *mut World<E>) {
    if !world.is_null() {
        drop(unsafe { Box::from_raw(world) });
    }
}

/// Releases a success buffer. Null is a no-op.
///
/// # Safety
/// `data` must be null or the `data` of a successful [`FolioResult`] not yet
/// released, and `len` must be that result's `len`.
pub unsafe fn result_free(data: *mut u8, len: usize) {
    if !data.is_null() {
        drop(unsafe { Box::from_raw(ptr::slice_from_raw_parts_mut(data, len)) });
    }
}

/// Number of font files in a world's registry; 0 for null.
///
/// # Safety
/// `world` must be null or a live pointer from [`world_new`].
pub unsafe fn world_font_count<E: TypesetEngine>(world: *const World<E>) -> usize {
    unsafe { world.as_ref() }.map_or(0, |world| world.fonts().len())
}
