use enough::Unstoppable;
use netpbm_codec::*;

fn bitmap_pattern(w: usize, h: usize) -> PixelGrid {
    let mut grid = PixelGrid::new(w, h);
    for y in 0..h {
        for x in 0..w {
            if (x * 3 + y) % 5 < 2 {
                grid.set(x, y, BLACK);
            }
        }
    }
    grid
}

fn gray_ramp(w: usize, h: usize) -> PixelGrid {
    let pixels = (0..w * h).map(|i| gray((i * 37 % 256) as u8)).collect();
    PixelGrid::from_pixels(w, h, pixels).unwrap()
}

fn color_noise(w: usize, h: usize) -> PixelGrid {
    let mut state: u32 = 0xDEAD_BEEF;
    let pixels = (0..w * h)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            RGB8::new(state as u8, (state >> 8) as u8, (state >> 16) as u8)
        })
        .collect();
    PixelGrid::from_pixels(w, h, pixels).unwrap()
}

fn representable(format: Format, w: usize, h: usize) -> PixelGrid {
    match format {
        Format::P1 | Format::P4 => bitmap_pattern(w, h),
        Format::P2 | Format::P5 => gray_ramp(w, h),
        Format::P3 | Format::P6 => color_noise(w, h),
    }
}

#[test]
fn every_format_roundtrips() {
    for format in Format::ALL {
        for (w, h) in [(1, 1), (8, 1), (3, 7), (13, 5)] {
            let grid = representable(format, w, h);
            let header = Header::new(format, w as u32, h as u32);
            let bytes = encode(&grid, &header, format.mode(), Unstoppable).unwrap();
            let (decoded_header, decoded) = decode(&bytes, Unstoppable).unwrap();
            assert_eq!(decoded_header, header, "{format} {w}x{h}");
            assert_eq!(decoded, grid, "{format} {w}x{h}");
            assert_eq!(decoded.len(), w * h);
        }
    }
}

#[test]
fn plain_and_binary_agree() {
    for (plain, binary) in [
        (Format::P1, Format::P4),
        (Format::P2, Format::P5),
        (Format::P3, Format::P6),
    ] {
        let grid = representable(plain, 9, 4);
        let text = encode(&grid, &Header::new(plain, 9, 4), EncodeMode::Plain, Unstoppable).unwrap();
        let raw = encode(&grid, &Header::new(binary, 9, 4), EncodeMode::Binary, Unstoppable).unwrap();
        let (_, from_text) = decode(&text, Unstoppable).unwrap();
        let (_, from_raw) = decode(&raw, Unstoppable).unwrap();
        assert_eq!(from_text, from_raw, "{plain} vs {binary}");
    }
}

#[test]
fn color_grid_collapses_to_gray_and_bitmap() {
    let grid = PixelGrid::from_pixels(
        3,
        1,
        vec![RGB8::new(200, 10, 0), RGB8::new(100, 250, 250), RGB8::new(127, 127, 127)],
    )
    .unwrap();

    let pgm = encode(&grid, &Header::new(Format::P5, 3, 1), EncodeMode::Binary, Unstoppable).unwrap();
    let (_, gray_grid) = decode(&pgm, Unstoppable).unwrap();
    assert_eq!(gray_grid.pixels(), &[gray(70), gray(200), gray(127)]);

    // Threshold looks at red only.
    let pbm = encode(&grid, &Header::new(Format::P1, 3, 1), EncodeMode::Plain, Unstoppable).unwrap();
    let (_, bits) = decode(&pbm, Unstoppable).unwrap();
    assert_eq!(bits.pixels(), &[WHITE, BLACK, BLACK]);
}

#[test]
fn checker_scenario() {
    let (header, grid) = decode(b"P1\n2 2\n1 0\n0 1\n", Unstoppable).unwrap();
    assert_eq!(header, Header::new(Format::P1, 2, 2));
    assert_eq!(grid.get(0, 0), Some(BLACK));
    assert_eq!(grid.get(1, 0), Some(WHITE));
    assert_eq!(grid.get(0, 1), Some(WHITE));
    assert_eq!(grid.get(1, 1), Some(BLACK));

    let text = encode(&grid, &header, EncodeMode::Plain, Unstoppable).unwrap();
    let text = String::from_utf8(text).unwrap();
    let tokens: Vec<&str> = text.split_whitespace().skip(3).collect();
    assert_eq!(tokens, ["1", "0", "0", "1"]);
}

#[test]
fn p1_black_then_white() {
    let grid = PixelGrid::from_pixels(2, 1, vec![BLACK, WHITE]).unwrap();
    let text = encode(&grid, &Header::new(Format::P1, 2, 1), EncodeMode::Plain, Unstoppable).unwrap();
    assert!(text.ends_with(b"1 0 "));
}

#[test]
fn p4_polarity() {
    let white = PixelGrid::new(8, 1);
    let black = PixelGrid::from_pixels(8, 1, vec![BLACK; 8]).unwrap();
    let header = Header::new(Format::P4, 8, 1);
    let w = encode(&white, &header, EncodeMode::Binary, Unstoppable).unwrap();
    let b = encode(&black, &header, EncodeMode::Binary, Unstoppable).unwrap();
    assert_eq!(w.last(), Some(&0x00));
    assert_eq!(b.last(), Some(&0xFF));
}

#[test]
fn imgref_interop() {
    let grid = color_noise(4, 3);
    let img = grid.clone().into_imgvec();
    assert_eq!(img.width(), 4);
    assert_eq!(img.height(), 3);
    assert_eq!(PixelGrid::from(img), grid);
    assert_eq!(grid.as_imgref()[(2usize, 1usize)], grid.get(2, 1).unwrap());
}

#[test]
fn file_roundtrip() {
    let dir = std::env::temp_dir();
    let path = dir.join(format!("netpbm-codec-roundtrip-{}.ppm", std::process::id()));
    let grid = color_noise(5, 4);
    let header = Header::new(Format::P6, 5, 4);

    encode_file(&grid, &header, EncodeMode::Binary, &path, Unstoppable).unwrap();
    let (decoded_header, decoded) = decode_file(&path, false, Unstoppable).unwrap();
    std::fs::remove_file(&path).unwrap();

    assert_eq!(decoded_header, header);
    assert_eq!(decoded, grid);
}

#[test]
fn ui_extension_mapping_feeds_encoder() {
    let grid = gray_ramp(3, 3);
    for (ext, mode, expected) in [
        ("pbm", EncodeMode::Binary, Format::P4),
        ("pgm", EncodeMode::Plain, Format::P2),
        ("ppm", EncodeMode::Plain, Format::P3),
    ] {
        let format = Format::for_extension(ext, mode).unwrap();
        assert_eq!(format, expected);
        let bytes = encode(&grid, &Header::new(format, 3, 3), mode, Unstoppable).unwrap();
        assert!(bytes.starts_with(format.tag().as_bytes()));
    }
}
