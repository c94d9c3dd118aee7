//! C bindings for folio.
//!
//! Exposes a Typst-backed [`World`](folio_core::World) as an opaque handle
//! plus the functions to compile against it and to release what it hands
//! out. The declarations live in `include/folio_ffi.h`.
//!
//! # Lifecycle
//!
//! ```c
//! FolioWorld *world = folio_world_new(NULL, NULL, 0);
//! FolioResult res = folio_world_compile(world, src, src_len, NULL, 0, NULL, 0);
//! if (res.error == 0) {
//!     fwrite(res.data, 1, res.len, out);
//!     folio_result_free(res.data, res.len);
//! }
//! folio_world_free(world);
//! ```
//!
//! A world may be compiled against from several threads at once. Each
//! success buffer is released exactly once; failures carry no buffer.
//!
//! # Logging
//!
//! The first `folio_world_new` installs `env_logger`, so `RUST_LOG` controls
//! what the library prints to stderr. Compile failures are logged at `warn`.

pub mod boundary;
mod error;

pub use boundary::{FOLIO_ERROR, FOLIO_OK, FolioResult};
pub use error::FfiError;

use folio_core::World;
use folio_typst::TypstEngine;
use std::ptr;
use std::sync::Once;

/// Opaque compiler instance handed to C.
pub type FolioWorld = World<TypstEngine>;

static LOGGER: Once = Once::new();

fn init_logging() {
    LOGGER.call_once(|| {
        // Another logger may already be installed by the host
        let _ = env_logger::try_init();
    });
}

/// Creates a compiler instance with the bundled fonts plus optional custom fonts.
///
/// Pass `NULL`/`0` for no custom fonts. Null or zero-length entries are
/// skipped. Font bytes are copied; the caller may free them afterwards.
///
/// Returns null only if construction panicked. Release with
/// [`folio_world_free`].
///
/// # Safety
/// See [`boundary::world_new`].
#[unsafe(no_mangle)]
pub unsafe extern "C" fn folio_world_new(
    font_ptrs: *const *const u8,
    font_lens: *const usize,
    font_count: usize,
) -> *mut FolioWorld {
    init_logging();
    unsafe { boundary::world_new(TypstEngine::new(), font_ptrs, font_lens, font_count) }
}

/// Compiles a Typst source to PDF.
///
/// `root_ptr`/`root_len` name the directory local references resolve
/// against, `pkg_ptr`/`pkg_len` the package cache. Either may be `NULL`/`0`
/// to disable that kind of reference.
///
/// # Safety
/// See [`boundary::world_compile`].
#[unsafe(no_mangle)]
pub unsafe extern "C" fn folio_world_compile(
    world: *const FolioWorld,
    source_ptr: *const u8,
    source_len: usize,
    root_ptr: *const u8,
    root_len: usize,
    pkg_ptr: *const u8,
    pkg_len: usize,
) -> FolioResult {
    unsafe {
        boundary::world_compile(world, source_ptr, source_len, root_ptr, root_len, pkg_ptr, pkg_len)
    }
}

/// Compiles with local files and packages both disabled.
///
/// # Safety
/// See [`boundary::world_compile`].
#[unsafe(no_mangle)]
pub unsafe extern "C" fn folio_world_compile_simple(
    world: *const FolioWorld,
    source_ptr: *const u8,
    source_len: usize,
) -> FolioResult {
    unsafe {
        boundary::world_compile(
            world,
            source_ptr,
            source_len,
            ptr::null(),
            0,
            ptr::null(),
            0,
        )
    }
}

/// Number of font files (bundled plus custom) in the world; 0 for null.
///
/// # Safety
/// `world` must be null or a live handle.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn folio_world_font_count(world: *const FolioWorld) -> usize {
    unsafe { boundary::world_font_count(world) }
}

/// Releases a compiler instance. Null is a no-op.
///
/// # Safety
/// `world` must be null or a handle not yet released.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn folio_world_free(world: *mut FolioWorld) {
    unsafe { boundary::world_free(world) }
}

/// Releases the buffer of a successful compile. Null is a no-op.
///
/// # Safety
/// `data`/`len` must come from one successful [`FolioResult`], released once.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn folio_result_free(data: *mut u8, len: usize) {
    unsafe { boundary::result_free(data, len) }
}
