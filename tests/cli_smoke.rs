use std::path::PathBuf;

use slidereel::{Canvas, Ease, Fps, SlideshowBuilder};

fn write_fixture(dir: &PathBuf) -> PathBuf {
    std::fs::create_dir_all(dir.join("img")).unwrap();

    let img = image::RgbaImage::from_pixel(8, 8, image::Rgba([200, 40, 40, 255]));
    img.save(dir.join("img").join("1.png")).unwrap();

    let show = SlideshowBuilder::new(
        Fps::new(30, 1).unwrap(),
        Canvas {
            width: 64,
            height: 64,
        },
    )
    .slide_duration_secs(1.0)
    .fade(0.0, Ease::Linear)
    .image("img/1.png")
    .build()
    .unwrap();

    let show_path = dir.join("show.json");
    let f = std::fs::File::create(&show_path).unwrap();
    serde_json::to_writer_pretty(f, &show).unwrap();
    show_path
}

fn bin_path() -> PathBuf {
    std::env::var_os("CARGO_BIN_EXE_slidereel")
        .map(PathBuf::from)
        .unwrap_or_else(|| {
            let mut p = PathBuf::from("target").join("debug");
            p.push(if cfg!(windows) {
                "slidereel.exe"
            } else {
                "slidereel"
            });
            p
        })
}

#[test]
fn cli_timeline_prints_segment_table() {
    let dir = PathBuf::from("target").join("cli_smoke_timeline");
    let show_path = write_fixture(&dir);

    let output = std::process::Command::new(bin_path())
        .args(["timeline", "--in"])
        .arg(&show_path)
        .output()
        .unwrap();

    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["id"], "MyVideo");
    assert_eq!(json["duration"], 30);
    assert_eq!(json["segments"][0]["name"], "image-0");
}

#[test]
fn cli_frame_writes_png() {
    let dir = PathBuf::from("target").join("cli_smoke_frame");
    let show_path = write_fixture(&dir);
    let out_path = dir.join("out.png");
    let _ = std::fs::remove_file(&out_path);

    let status = std::process::Command::new(bin_path())
        .args(["frame", "--in"])
        .arg(&show_path)
        .args(["--frame", "0", "--out"])
        .arg(&out_path)
        .status()
        .unwrap();

    assert!(status.success());
    assert!(out_path.exists());

    let png = image::open(&out_path).unwrap().to_rgba8();
    assert_eq!(png.dimensions(), (64, 64));
}
