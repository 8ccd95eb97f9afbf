use super::*;
use crate::foundation::core::Rgba8;

fn scratch(name: &str) -> PathBuf {
    let dir = PathBuf::from("target").join("unit_gif").join(name);
    let _ = std::fs::remove_dir_all(&dir);
    dir
}

fn cfg(width: u32, height: u32) -> SinkConfig {
    SinkConfig {
        width,
        height,
        frame_delay_ms: 100,
        background: Rgba8::WHITE,
    }
}

fn solid(width: u32, height: u32, rgba: [u8; 4]) -> FrameRGBA {
    FrameRGBA {
        width,
        height,
        data: rgba.repeat((width * height) as usize),
        premultiplied: true,
    }
}

#[test]
fn artifact_names_are_trimmed_and_safe() {
    assert_eq!(artifact_file_name("_test_"), "test.gif");
    assert_eq!(artifact_file_name("__Zig Zag__"), "Zig Zag.gif");
    assert_eq!(artifact_file_name("in_between"), "in_between.gif");
    assert_eq!(artifact_file_name("../up"), ".._up.gif");
    assert_eq!(artifact_file_name("a\\b"), "a_b.gif");
    assert_eq!(artifact_file_name("___"), "pattern.gif");
    assert_eq!(artifact_file_name(".."), "pattern.gif");
}

#[test]
fn writes_looping_gif_with_all_frames() {
    let dir = scratch("two_frames");
    let out = dir.join("anim.gif");
    let mut sink = GifSink::new(GifSinkOpts::new(&out));

    sink.begin(cfg(8, 8)).unwrap();
    sink.push_frame(FrameIndex(0), &solid(8, 8, [255, 0, 0, 255]))
        .unwrap();
    sink.push_frame(FrameIndex(1), &solid(8, 8, [0, 0, 255, 255]))
        .unwrap();
    sink.end().unwrap();

    assert!(out.exists());
    assert!(!part_path_for(&out).exists());

    let bytes = std::fs::read(&out).unwrap();
    assert_eq!(&bytes[..6], b"GIF89a");
    // NETSCAPE2.0 application extension carries the loop count.
    assert!(bytes.windows(11).any(|w| w == b"NETSCAPE2.0"));

    use image::AnimationDecoder as _;
    let decoder = image::codecs::gif::GifDecoder::new(std::io::Cursor::new(bytes)).unwrap();
    let frames = decoder.into_frames().collect_frames().unwrap();
    assert_eq!(frames.len(), 2);
    for f in &frames {
        let (num, den) = f.delay().numer_denom_ms();
        assert_eq!(num / den, 100);
        assert_eq!(f.buffer().dimensions(), (8, 8));
    }
    let [r, _, b, a] = frames[0].buffer().get_pixel(3, 3).0;
    assert!(r > 200 && b < 50 && a == 255);
    let [r, _, b, a] = frames[1].buffer().get_pixel(3, 3).0;
    assert!(b > 200 && r < 50 && a == 255);
}

#[test]
fn identical_input_gives_identical_bytes() {
    let dir = scratch("determinism");
    let mut outputs = Vec::new();
    for name in ["a.gif", "b.gif"] {
        let out = dir.join(name);
        let mut sink = GifSink::new(GifSinkOpts::new(&out));
        sink.begin(cfg(6, 4)).unwrap();
        sink.push_frame(FrameIndex(0), &solid(6, 4, [10, 200, 30, 255]))
            .unwrap();
        sink.end().unwrap();
        outputs.push(std::fs::read(&out).unwrap());
    }
    assert_eq!(outputs[0], outputs[1]);
}

#[test]
fn out_of_order_frames_are_rejected() {
    let dir = scratch("order");
    let mut sink = GifSink::new(GifSinkOpts::new(dir.join("x.gif")));
    sink.begin(cfg(2, 2)).unwrap();
    sink.push_frame(FrameIndex(3), &solid(2, 2, [0, 0, 0, 255]))
        .unwrap();
    let err = sink
        .push_frame(FrameIndex(3), &solid(2, 2, [0, 0, 0, 255]))
        .unwrap_err();
    assert!(matches!(err, PathVizError::Encode(_)));
}

#[test]
fn size_mismatch_is_rejected() {
    let dir = scratch("size");
    let mut sink = GifSink::new(GifSinkOpts::new(dir.join("x.gif")));
    sink.begin(cfg(2, 2)).unwrap();
    let err = sink
        .push_frame(FrameIndex(0), &solid(3, 2, [0, 0, 0, 255]))
        .unwrap_err();
    assert!(matches!(err, PathVizError::Validation(_)));
}

#[test]
fn empty_animation_leaves_no_files() {
    let dir = scratch("empty");
    let out = dir.join("none.gif");
    let mut sink = GifSink::new(GifSinkOpts::new(&out));
    sink.begin(cfg(2, 2)).unwrap();
    assert!(sink.end().is_err());
    assert!(!out.exists());
    assert!(!part_path_for(&out).exists());
}

#[test]
fn dropped_sink_removes_partial_file() {
    let dir = scratch("dropped");
    let out = dir.join("half.gif");
    {
        let mut sink = GifSink::new(GifSinkOpts::new(&out));
        sink.begin(cfg(2, 2)).unwrap();
        sink.push_frame(FrameIndex(0), &solid(2, 2, [0, 0, 0, 255]))
            .unwrap();
        assert!(part_path_for(&out).exists());
    }
    assert!(!part_path_for(&out).exists());
    assert!(!out.exists());
}

#[test]
fn invalid_configs_are_rejected() {
    let dir = scratch("invalid");
    let mut sink = GifSink::new(GifSinkOpts::new(dir.join("x.gif")));
    assert!(sink.begin(cfg(0, 2)).is_err());
    assert!(sink.begin(cfg(70_000, 2)).is_err());
    assert!(
        sink.begin(SinkConfig {
            frame_delay_ms: 0,
            ..cfg(2, 2)
        })
        .is_err()
    );

    let mut slow = GifSink::new(GifSinkOpts {
        out_path: dir.join("y.gif"),
        speed: 0,
    });
    assert!(slow.begin(cfg(2, 2)).is_err());
}
