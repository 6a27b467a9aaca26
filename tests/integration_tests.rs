//! End-to-end tests against an on-disk asset directory

use std::fs;
use std::path::Path;

use handscript::rendering::raster::write_pages;
use handscript::{DirectoryAssetStore, FailureKind, MemoryAssetStore, RenderConfig};
use image::{Rgba, RgbaImage};
use tempfile::TempDir;

const PAPER: Rgba<u8> = Rgba([255, 255, 250, 255]);
const INK: Rgba<u8> = Rgba([0, 0, 60, 255]);

/// Removed on drop, also when an assertion fails
fn scratch_dir() -> TempDir {
    tempfile::tempdir().expect("create scratch dir")
}

/// Write a small asset directory: background, fallback and glyphs for "abc"
fn write_assets(dir: &Path) {
    RgbaImage::from_pixel(400, 300, PAPER).save(dir.join("bg.png")).unwrap();
    RgbaImage::from_pixel(12, 40, Rgba([200, 0, 0, 255]))
        .save(dir.join("default.png"))
        .unwrap();
    for (ch, width) in [('a', 20), ('b', 24), ('c', 18)] {
        RgbaImage::from_pixel(width, 40, INK)
            .save(dir.join(format!("{}.png", ch as u32)))
            .unwrap();
    }
}

#[test]
fn directory_and_eager_stores_render_identically() {
    let tmp = scratch_dir();
    let dir = tmp.path();
    write_assets(dir);

    let text = "abc cab\nbad cab!";
    let cfg = RenderConfig::default();
    let lazy = handscript::text_to_images(text, 6, &DirectoryAssetStore::new(dir), &cfg).unwrap();
    let eager_store = MemoryAssetStore::from_dir(dir).unwrap();
    let eager = handscript::text_to_images(text, 6, &eager_store, &cfg).unwrap();

    assert_eq!(lazy.chunk_count, 3);
    assert_eq!(lazy.succeeded(), 3);
    let lazy_digests: Vec<_> = lazy.pages.iter().map(|p| p.digest()).collect();
    let eager_digests: Vec<_> = eager.pages.iter().map(|p| p.digest()).collect();
    assert_eq!(lazy_digests, eager_digests);
}

#[test]
fn pages_are_written_and_decode_back() {
    let tmp = scratch_dir();
    let dir = tmp.path();
    let assets = dir.join("font");
    fs::create_dir_all(&assets).unwrap();
    write_assets(&assets);

    let conv = handscript::text_to_images(
        "abcabcabc",
        4,
        &DirectoryAssetStore::new(&assets),
        &RenderConfig::default(),
    )
    .unwrap();
    let out = dir.join("out");
    let written = write_pages(&out, &conv.pages).unwrap();

    assert_eq!(written.len(), 3);
    assert!(written[0].ends_with("handwriting_output_part_1.png"));
    assert!(written[2].ends_with("handwriting_output_part_3.png"));

    let decoded = image::open(&written[0]).unwrap().to_rgba8();
    assert_eq!(&decoded, conv.pages[0].image());
    // 'a' sits at the origin of the first page
    assert_eq!(*decoded.get_pixel(1, 1), INK);
}

#[test]
fn missing_background_is_reported_per_chunk() {
    let tmp = scratch_dir();
    let dir = tmp.path();
    write_assets(dir);
    fs::remove_file(dir.join("bg.png")).unwrap();

    let conv = handscript::text_to_images(
        "abcabc",
        3,
        &DirectoryAssetStore::new(dir),
        &RenderConfig::default(),
    )
    .unwrap();
    assert!(conv.pages.is_empty());
    assert_eq!(conv.failed(), 2);
    assert!(conv.failures.iter().all(|f| f.kind == FailureKind::AssetMissing));
}

#[test]
fn corrupt_glyph_only_fails_its_own_chunk() {
    let tmp = scratch_dir();
    let dir = tmp.path();
    write_assets(dir);
    fs::write(dir.join(format!("{}.png", 'z' as u32)), b"\x89PNG but not really").unwrap();

    let conv = handscript::text_to_images(
        "abcazcabc",
        3,
        &DirectoryAssetStore::new(dir),
        &RenderConfig::default(),
    )
    .unwrap();
    assert_eq!(conv.chunk_count, 3);
    assert_eq!(conv.succeeded(), 2);
    assert_eq!(conv.failures.len(), 1);
    assert_eq!(conv.failures[0].index, 1);
    assert_eq!(conv.failures[0].kind, FailureKind::RenderFailure);

    // the eager loader refuses the whole directory instead
    assert!(MemoryAssetStore::from_dir(dir).is_err());
}

#[test]
fn custom_file_names_are_honoured() {
    let tmp = scratch_dir();
    let dir = tmp.path();
    RgbaImage::from_pixel(200, 100, PAPER).save(dir.join("sheet.png")).unwrap();
    RgbaImage::from_pixel(10, 10, INK).save(dir.join("97.png")).unwrap();

    let store = DirectoryAssetStore::new(dir).with_background_file("sheet.png");
    let conv = handscript::text_to_images("aa", 10, &store, &RenderConfig::default()).unwrap();
    assert_eq!(conv.succeeded(), 1);
    assert_eq!(conv.pages[0].width(), 200);
}
