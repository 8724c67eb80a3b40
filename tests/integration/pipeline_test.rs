// Pipeline Integration Tests
//
// Covers the request → artifact flow end to end over a memory store:
// - artifact keys and content are deterministic
// - rotate keeps dimensions, resize hits exact targets
// - format negotiation and content types
// - every failure path leaves the store untouched

use bytes::Bytes;
use pixelstore::error::ImageError;
use pixelstore::pipeline::{Angle, TransformRequest, TransformationType};
use pixelstore::storage::{BlobStore, KeyStrategy};
use pixelstore::transform::Bounds;
use rstest::rstest;

use super::test_harness::{decode, encode, gradient, memory_engine, seed};

#[test]
fn test_rotate_is_idempotent() {
    let (engine, store) = memory_engine();
    seed(&store, "cat.png", 24, 16, "png");

    let first = engine.rotate("cat.png", "30", None).unwrap();
    let stored_first = store.get("cat_rotated_30.png").unwrap();
    let second = engine.rotate("cat.png", "30", None).unwrap();
    let stored_second = store.get("cat_rotated_30.png").unwrap();

    assert_eq!(first.key, second.key);
    assert_eq!(first.data, second.data);
    assert_eq!(stored_first, stored_second);
    assert_eq!(store.len(), 2);
}

#[test]
fn test_resize_is_idempotent() {
    let (engine, store) = memory_engine();
    seed(&store, "cat.png", 40, 30, "png");

    let first = engine.resize("cat.png", 20, 10, None).unwrap();
    let second = engine.resize("cat.png", 20, 10, None).unwrap();

    assert_eq!(first.key.as_deref(), Some("cat_resized_20x10.png"));
    assert_eq!(first.key, second.key);
    assert_eq!(first.data, second.data);
    assert_eq!(store.len(), 2);
}

#[rstest]
#[case("0")]
#[case("45")]
#[case("90")]
#[case("-17.25")]
#[case("180")]
#[case("359.9")]
fn test_rotate_preserves_dimensions(#[case] angle: &str) {
    let (engine, store) = memory_engine();
    seed(&store, "src", 33, 21, "png");

    let out = engine.rotate("src", angle, None).unwrap();
    let rotated = decode(&out.data);

    assert_eq!(rotated.bounds(), Bounds::from_size(33, 21));
    assert_eq!(out.stats.output_dimensions, (33, 21));
    assert_eq!(
        out.key,
        Some(format!("src_rotated_{}.png", angle))
    );
}

#[rstest]
#[case("0")]
#[case("360")]
fn test_identity_angles(#[case] angle: &str) {
    let (engine, store) = memory_engine();
    let original = seed(&store, "src.png", 17, 12, "png");

    let out = engine.rotate("src.png", angle, None).unwrap();
    assert_eq!(decode(&out.data), original);
}

#[test]
fn test_png_round_trip_through_fetch() {
    let (engine, _store) = memory_engine();
    let original = gradient(19, 7);

    let key = engine
        .upload(encode(&original, "png"), &KeyStrategy::Random)
        .unwrap();
    let out = engine.fetch(&key, None).unwrap();

    assert_eq!(out.format, "png");
    assert_eq!(out.content_type, "image/png");
    assert_eq!(out.key, None);
    assert_eq!(decode(&out.data), original);
}

#[rstest]
#[case(50, 25, (50, 25))]
#[case(200, 80, (200, 80))]
#[case(1, 1, (1, 1))]
#[case(0, 30, (60, 30))]
#[case(30, 0, (30, 15))]
fn test_resize_output_bounds(
    #[case] width: u32,
    #[case] height: u32,
    #[case] expected: (u32, u32),
) {
    let (engine, store) = memory_engine();
    seed(&store, "wide", 100, 50, "png");

    let out = engine.resize("wide", width, height, None).unwrap();
    let resized = decode(&out.data);

    assert_eq!(resized.bounds(), Bounds::from_size(expected.0, expected.1));
    assert_eq!(out.stats.kind, TransformationType::Resize);
    assert!(out.stats.was_resized() || expected == (100, 50));
}

#[test]
fn test_resize_down_then_up_keeps_bounds() {
    let (engine, store) = memory_engine();
    seed(&store, "square.png", 100, 100, "png");

    let down = engine.resize("square.png", 50, 50, None).unwrap();
    let down_key = down.key.unwrap();
    assert_eq!(down_key, "square_resized_50x50.png");

    let up = engine.resize(&down_key, 100, 100, None).unwrap();
    assert_eq!(up.key.as_deref(), Some("square_resized_50x50_resized_100x100.png"));
    assert_eq!(decode(&up.data).bounds(), Bounds::from_size(100, 100));
}

#[rstest]
#[case(TransformRequest::fetch("src"))]
#[case(TransformRequest::parse_rotate("src", "90").unwrap())]
#[case(TransformRequest::resize("src", 10, 10))]
fn test_bmp_is_unknown_format(#[case] request: TransformRequest) {
    let (engine, store) = memory_engine();
    seed(&store, "src", 8, 8, "png");

    let err = engine.process(&request.with_format("bmp")).unwrap_err();
    assert_eq!(err, ImageError::unknown_format("bmp"));
    assert_eq!(err.to_http_status(), 400);
    assert_eq!(store.keys(), vec!["src".to_string()]);
}

#[rstest]
#[case("jpeg", "image/jpeg", "jpeg")]
#[case("jpg", "image/jpeg", "jpeg")]
#[case("png", "image/png", "png")]
#[case("gif", "image/gif", "gif")]
#[case("webp", "image/webp", "webp")]
fn test_format_override(
    #[case] token: &str,
    #[case] content_type: &str,
    #[case] ext: &str,
) {
    let (engine, store) = memory_engine();
    seed(&store, "photo.png", 12, 9, "png");

    let out = engine.rotate("photo.png", "90", Some(token)).unwrap();

    assert_eq!(out.content_type, content_type);
    assert_eq!(out.format, ext);
    let expected_key = format!("photo_rotated_90.{}", ext);
    assert_eq!(out.key.as_deref(), Some(expected_key.as_str()));
    assert_eq!(store.get(&expected_key).unwrap(), out.data);

    // The artifact decodes as the format it claims
    let decoded = pixelstore::codec::CodecRegistry::global()
        .decode(&out.data)
        .unwrap();
    assert_eq!(decoded.format, ext);
    assert_eq!(decoded.raster.dimensions(), (12, 9));
}

#[rstest]
#[case("jpeg")]
#[case("gif")]
#[case("webp")]
fn test_source_format_is_kept_by_default(#[case] token: &str) {
    let (engine, store) = memory_engine();
    seed(&store, "img", 10, 10, token);

    let out = engine.resize("img", 5, 5, None).unwrap();
    assert_eq!(out.format, token);
    assert_eq!(out.key, Some(format!("img_resized_5x5.{}", token)));
}

#[test]
fn test_missing_source_is_not_found() {
    let (engine, store) = memory_engine();

    let err = engine.fetch("nope", None).unwrap_err();
    assert_eq!(err, ImageError::not_found("nope"));
    assert_eq!(err.to_http_status(), 404);

    assert!(matches!(
        engine.rotate("nope", "10", None),
        Err(ImageError::NotFound { .. })
    ));
    assert!(store.is_empty());
}

#[test]
fn test_corrupt_source_writes_nothing() {
    let (engine, store) = memory_engine();
    store
        .put("junk", Bytes::from_static(b"this is not an image"))
        .unwrap();

    let err = engine.rotate("junk", "90", None).unwrap_err();
    assert!(matches!(err, ImageError::UnsupportedOrCorruptImage { .. }));
    assert_eq!(err.to_http_status(), 500);
    assert_eq!(store.keys(), vec!["junk".to_string()]);
}

#[test]
fn test_write_failure_is_reported() {
    let (engine, store) = memory_engine();
    seed(&store, "src", 6, 6, "png");
    store.set_write_failure(true);

    let err = engine.resize("src", 3, 3, None).unwrap_err();
    assert!(matches!(err, ImageError::StorageWriteFailed { .. }));
    assert_eq!(err.to_http_status(), 500);
    assert_eq!(store.len(), 1);

    // Fetch never writes, so it still works
    assert!(engine.fetch("src", None).is_ok());
}

#[test]
fn test_read_failure_is_reported() {
    let (engine, store) = memory_engine();
    seed(&store, "src", 6, 6, "png");
    store.set_read_failure(true);

    let err = engine.fetch("src", None).unwrap_err();
    assert!(matches!(err, ImageError::StorageReadFailed { .. }));
}

#[rstest]
#[case("abc")]
#[case("")]
#[case("inf")]
#[case("NaN")]
fn test_invalid_angle(#[case] angle: &str) {
    let (engine, store) = memory_engine();
    seed(&store, "src", 4, 4, "png");

    let err = engine.rotate("src", angle, None).unwrap_err();
    assert_eq!(err, ImageError::invalid_angle(angle));
    assert_eq!(err.to_http_status(), 400);
    assert_eq!(store.len(), 1);
}

#[test]
fn test_zero_by_zero_resize_rejected() {
    let (engine, store) = memory_engine();
    seed(&store, "src", 4, 4, "png");

    let err = engine.resize("src", 0, 0, None).unwrap_err();
    assert!(matches!(err, ImageError::InvalidDimension { .. }));
    assert_eq!(err.to_http_status(), 400);
    assert_eq!(store.len(), 1);
}

#[rstest]
#[case("../secret")]
#[case("a/b")]
#[case("..")]
#[case("")]
fn test_unsafe_keys_rejected(#[case] key: &str) {
    let (engine, store) = memory_engine();

    let err = engine.fetch(key, None).unwrap_err();
    assert!(matches!(err, ImageError::InvalidKey { .. }), "{:?}", err);
    assert_eq!(err.to_http_status(), 400);

    let err = engine
        .upload(
            Bytes::from_static(b"x"),
            &KeyStrategy::Explicit(key.to_string()),
        )
        .unwrap_err();
    assert!(matches!(err, ImageError::InvalidKey { .. }));
    assert!(store.is_empty());
}

#[test]
fn test_upload_stores_bytes_verbatim() {
    let (engine, store) = memory_engine();
    let payload = Bytes::from_static(b"\x00\x01 not even an image");

    let key = engine.upload(payload.clone(), &KeyStrategy::Random).unwrap();
    assert!(uuid::Uuid::parse_str(&key).is_ok());
    assert_eq!(store.get(&key).unwrap(), payload);

    let other = engine.upload(payload, &KeyStrategy::Random).unwrap();
    assert_ne!(key, other);
}

#[test]
fn test_distinct_parameters_never_collide() {
    let (engine, store) = memory_engine();
    seed(&store, "p.png", 10, 10, "png");

    let keys: Vec<String> = [
        engine.rotate("p.png", "90", None),
        engine.rotate("p.png", "90.0", None),
        engine.rotate("p.png", "-90", None),
        engine.resize("p.png", 1, 23, None),
        engine.resize("p.png", 12, 3, None),
        engine.rotate("p.png", "90", Some("gif")),
    ]
    .into_iter()
    .map(|r| r.unwrap().key.unwrap())
    .collect();

    let mut unique = keys.clone();
    unique.sort();
    unique.dedup();
    assert_eq!(unique.len(), keys.len());
    assert_eq!(store.len(), keys.len() + 1);
}

#[test]
fn test_angle_literal_drives_key_not_value() {
    let (engine, store) = memory_engine();
    seed(&store, "p", 10, 10, "png");

    let a = engine
        .process(&TransformRequest::rotate("p", "90".parse::<Angle>().unwrap()))
        .unwrap();
    let b = engine
        .process(&TransformRequest::rotate("p", "90.00".parse::<Angle>().unwrap()))
        .unwrap();

    assert_ne!(a.key, b.key);
    assert_eq!(a.data, b.data);
}

#[test]
fn test_rotation_clips_to_same_canvas() {
    let (engine, store) = memory_engine();
    let original = seed(&store, "sq", 20, 20, "png");

    let out = engine.rotate("sq", "45", None).unwrap();
    let rotated = decode(&out.data);

    assert_eq!(rotated.bounds(), original.bounds());
    // Corners rotate out of the canvas and stay transparent
    assert_eq!(rotated.pixel(0, 0), pixelstore::transform::TRANSPARENT);
    assert_eq!(rotated.pixel(19, 19), pixelstore::transform::TRANSPARENT);
}
