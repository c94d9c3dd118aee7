//! Randomized create/compile/release sequences under dhat's heap accounting.
//!
//! Uses the scripted engine so every block allocated during the run is owned
//! by a world or a result buffer and nothing is parked in engine caches.
//! dhat allows one profiler per process, hence a single test in this file.

use folio_core::testing::ScriptedEngine;
use folio_core::World;
use folio_ffi::FolioResult;
use folio_ffi::boundary::{result_free, world_compile, world_free, world_new};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::ptr;

#[global_allocator]
static ALLOC: dhat::Alloc = dhat::Alloc;

const SOURCES: &[&[u8]] = &[
    b"Hello",
    b"",
    b"#fail broken on purpose",
    b"#include \"missing.typ\"",
    b"#panic",
    b"line one\nline two\nline three",
    &[0xff, 0xfe, 0xfd],
];

fn new_world(rng: &mut StdRng) -> *mut World<ScriptedEngine> {
    let fonts: Vec<Vec<u8>> = (0..rng.random_range(0..4))
        .map(|i| vec![i as u8; rng.random_range(0..64)])
        .collect();
    let ptrs: Vec<*const u8> = fonts.iter().map(|f| f.as_ptr()).collect();
    let lens: Vec<usize> = fonts.iter().map(Vec::len).collect();

    let world = unsafe { world_new(ScriptedEngine::new(), ptrs.as_ptr(), lens.as_ptr(), fonts.len()) };
    assert!(!world.is_null());
    world
}

fn compile(world: *const World<ScriptedEngine>, source: &[u8]) -> FolioResult {
    unsafe {
        world_compile(
            world,
            source.as_ptr(),
            source.len(),
            ptr::null(),
            0,
            ptr::null(),
            0,
        )
    }
}

/// One random sequence: worlds come and go, results outlive their compile
/// and are released in arbitrary order, sometimes after their world.
fn run_sequence(rng: &mut StdRng, steps: usize) {
    let mut worlds: Vec<*mut World<ScriptedEngine>> = Vec::new();
    let mut results: Vec<FolioResult> = Vec::new();

    for _ in 0..steps {
        match rng.random_range(0..10) {
            0..=1 => worlds.push(new_world(rng)),
            2..=6 if !worlds.is_empty() => {
                let world = worlds[rng.random_range(0..worlds.len())];
                let source = SOURCES[rng.random_range(0..SOURCES.len())];
                let result = compile(world, source);
                if result.is_ok() {
                    results.push(result);
                } else {
                    assert!(result.data.is_null());
                }
            }
            7..=8 if !results.is_empty() => {
                let result = results.swap_remove(rng.random_range(0..results.len()));
                unsafe { result_free(result.data, result.len) };
            }
            9 if !worlds.is_empty() => {
                let world = worlds.swap_remove(rng.random_range(0..worlds.len()));
                unsafe { world_free(world) };
            }
            _ => {}
        }
    }

    for result in results {
        unsafe { result_free(result.data, result.len) };
    }
    for world in worlds {
        unsafe { world_free(world) };
    }
}

#[test]
fn test_random_sequences_release_everything() {
    // The scripted panic would otherwise print on every hit
    std::panic::set_hook(Box::new(|_| {}));

    let _profiler = dhat::Profiler::builder().testing().build();

    // Warm up lazily initialised runtime state (panic machinery, log facade)
    let mut rng = StdRng::seed_from_u64(7);
    run_sequence(&mut rng, 50);
    let baseline = dhat::HeapStats::get();

    for seed in 0..20 {
        let mut rng = StdRng::seed_from_u64(seed);
        run_sequence(&mut rng, 200);
    }

    let stats = dhat::HeapStats::get();
    dhat::assert_eq!(stats.curr_blocks, baseline.curr_blocks);
    dhat::assert_eq!(stats.curr_bytes, baseline.curr_bytes);
    dhat::assert!(stats.total_blocks > baseline.total_blocks);
}
