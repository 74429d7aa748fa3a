use rust_huffman_image::{ChannelLayout, HuffmanImageCodec, PixelImage};
use std::fs::File;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    // A 64x64 RGB gradient with a few flat bands
    let (width, height) = (64u32, 64u32);
    let mut samples = Vec::with_capacity((width * height * 3) as usize);
    for y in 0..height {
        for x in 0..width {
            samples.push((x / 8 * 32) as u8);
            samples.push((y / 16 * 64) as u8);
            samples.push(128);
        }
    }
    let image = PixelImage::new(width, height, ChannelLayout::Rgb, samples)?;
    println!("Created image: {}x{} RGB, {} bytes", width, height, image.samples.len());

    let codec = HuffmanImageCodec::new();

    // Compress to a file
    let mut output = File::create("sample.hufi")?;
    let written = codec.encode_to_writer(&image, &mut output)?;
    drop(output);

    let compression_ratio = written as f64 / image.samples.len() as f64;
    println!(
        "Compressed to: {} bytes ({:.1}% of original)",
        written,
        compression_ratio * 100.0
    );

    let info = codec.inspect(&std::fs::read("sample.hufi")?)?;
    let header = &info.header;
    println!(
        "Header: {}x{} {:?}, {} distinct symbols, longest code {} bits, {} payload bits",
        header.width,
        header.height,
        header.layout,
        header.code_lengths.len(),
        header.code_lengths.max_length(),
        info.bit_count
    );

    // Decompress the file
    let mut compressed = File::open("sample.hufi")?;
    let decoded = codec.decode_from_reader(&mut compressed)?;

    if decoded == image {
        println!("Decompression successful! Pixels match exactly.");
    } else {
        println!("Decompression failed! Pixel mismatch.");
        return Err("Decompression verification failed".into());
    }

    std::fs::remove_file("sample.hufi")?;
    println!("Cleaned up temporary files");

    Ok(())
}
