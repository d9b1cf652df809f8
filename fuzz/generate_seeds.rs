#!/usr/bin/env -S cargo +nightly -Zscript
//! Generate seed corpus files for fuzzing.
//! Run: cargo +nightly -Zscript fuzz/generate_seeds.rs

fn main() {
    use std::fs;
    let dir = "fuzz/corpus/fuzz_decode";
    fs::create_dir_all(dir).unwrap();

    // Plain formats
    fs::write(format!("{dir}/p1_2x2.pbm"), b"P1\n2 2\n1 0\n0 1\n").unwrap();
    fs::write(format!("{dir}/p2_3x1.pgm"), b"P2\n# comment\n3 1\n15\n0 7 15\n").unwrap();
    fs::write(format!("{dir}/p3_1x2.ppm"), b"P3 1 2 255 10 20 30 40 50 60").unwrap();

    // Binary formats
    fs::write(format!("{dir}/p4_9x1.pbm"), b"P4\n9 1\n\xa5\x80").unwrap();
    fs::write(format!("{dir}/p5_3x2.pgm"), b"P5\n3 2\n255\n\x00\x40\x80\xc0\xff\x64").unwrap();
    fs::write(format!("{dir}/p5_16bit.pgm"), b"P5\n2 1\n65535\n\xff\xff\x80\x00").unwrap();
    let ppm = b"P6\n2 2\n255\n\xff\x00\x00\x00\xff\x00\x00\x00\xff\x80\x80\x80";
    fs::write(format!("{dir}/p6_2x2.ppm"), ppm).unwrap();

    // Truncated/malformed seeds for edge coverage
    fs::write(format!("{dir}/empty.bin"), b"").unwrap();
    fs::write(format!("{dir}/just_p6.bin"), b"P6").unwrap();
    fs::write(format!("{dir}/unknown_tag.bin"), b"PX\n1 1\n").unwrap();
    fs::write(format!("{dir}/p1_short.bin"), b"P1\n10 10\n1 0 1\n").unwrap();
    fs::write(format!("{dir}/p2_over_max.bin"), b"P2\n1 1\n10\n11\n").unwrap();

    println!("Generated seed corpus in {dir}/");
}
