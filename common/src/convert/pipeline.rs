//! 変換パイプライン
//!
//! 読み込み → デコード → 透かし合成 → エンコード を順に実行する。
//! 読み込みだけが非同期（ブラウザのFileReader / tokio::fs）で、
//! 以降はCPU処理のみ。

use super::watermark::apply_watermark;
use super::{output_file_name, ConversionJob, ConvertedImage, OutputFormat, JPEG_QUALITY};
use crate::error::{Error, Result};
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder, RgbImage, RgbaImage};

/// 変換元ファイルのバイト列を読む
///
/// 失敗は `Error::Read` で返す。
#[allow(async_fn_in_trait)]
pub trait FileSource {
    async fn read_bytes(&self) -> Result<Vec<u8>>;
}

/// ファイルを読み込んで変換する
pub async fn convert_file<S: FileSource>(source: &S, job: &ConversionJob) -> Result<ConvertedImage> {
    tracing::debug!(name = %job.file.name, format = %job.format, "reading source file");
    let bytes = source.read_bytes().await?;
    convert_bytes(&bytes, &job.file.name, job.format)
}

/// 読み込み済みのバイト列を変換する
pub fn convert_bytes(bytes: &[u8], source_name: &str, format: OutputFormat) -> Result<ConvertedImage> {
    let decoded = image::load_from_memory(bytes).map_err(|e| Error::Decode(e.to_string()))?;

    // 元画像と同じサイズのキャンバスにそのまま描く
    let mut canvas: RgbaImage = decoded.to_rgba8();
    let (width, height) = canvas.dimensions();
    tracing::debug!(width, height, "source decoded");

    apply_watermark(&mut canvas);

    let encoded = encode(&canvas, format)?;
    tracing::debug!(bytes = encoded.len(), format = %format, "image encoded");

    Ok(ConvertedImage {
        bytes: encoded,
        format,
        width,
        height,
        file_name: output_file_name(source_name, format),
        version: 0,
    })
}

fn encode(canvas: &RgbaImage, format: OutputFormat) -> Result<Vec<u8>> {
    let (width, height) = canvas.dimensions();
    let mut buffer = Vec::new();

    let result = match format {
        OutputFormat::Png => PngEncoder::new(&mut buffer).write_image(
            canvas.as_raw(),
            width,
            height,
            ExtendedColorType::Rgba8,
        ),
        OutputFormat::Jpeg => {
            let flattened = flatten_on_black(canvas);
            JpegEncoder::new_with_quality(&mut buffer, JPEG_QUALITY).write_image(
                flattened.as_raw(),
                width,
                height,
                ExtendedColorType::Rgb8,
            )
        }
    };

    result.map_err(|e| Error::Encode(e.to_string()))?;
    Ok(buffer)
}

/// JPEGはアルファを持たないので黒背景に合成する
fn flatten_on_black(canvas: &RgbaImage) -> RgbImage {
    let (width, height) = canvas.dimensions();
    RgbImage::from_fn(width, height, |x, y| {
        let [r, g, b, a] = canvas.get_pixel(x, y).0;
        let scale = |c: u8| ((u16::from(c) * u16::from(a) + 127) / 255) as u8;
        image::Rgb([scale(r), scale(g), scale(b)])
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::SelectedFile;
    use futures::executor::block_on;
    use image::{DynamicImage, ImageFormat, Rgb};
    use std::io::Cursor;

    fn bmp_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = RgbImage::from_pixel(width, height, Rgb([20, 40, 60]));
        let mut buffer = Cursor::new(Vec::new());
        DynamicImage::ImageRgb8(img)
            .write_to(&mut buffer, ImageFormat::Bmp)
            .expect("BMP生成失敗");
        buffer.into_inner()
    }

    struct MemorySource(Result<Vec<u8>>);

    impl FileSource for MemorySource {
        async fn read_bytes(&self) -> Result<Vec<u8>> {
            match &self.0 {
                Ok(bytes) => Ok(bytes.clone()),
                Err(e) => Err(Error::Read(e.to_string())),
            }
        }
    }

    #[test]
    fn test_convert_png_keeps_dimensions() {
        let converted = convert_bytes(&bmp_bytes(320, 240), "splice.bmp", OutputFormat::Png).unwrap();
        assert_eq!(converted.file_name, "splice.png");
        assert_eq!((converted.width, converted.height), (320, 240));

        let decoded = image::load_from_memory(&converted.bytes).unwrap();
        assert_eq!(image::guess_format(&converted.bytes).unwrap(), ImageFormat::Png);
        assert_eq!((decoded.width(), decoded.height()), (320, 240));
    }

    #[test]
    fn test_convert_jpeg() {
        let converted = convert_bytes(&bmp_bytes(64, 48), "splice.bmp", OutputFormat::Jpeg).unwrap();
        assert_eq!(converted.file_name, "splice.jpeg");
        assert_eq!(converted.mime_type(), "image/jpeg");
        assert_eq!(image::guess_format(&converted.bytes).unwrap(), ImageFormat::Jpeg);

        let decoded = image::load_from_memory(&converted.bytes).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (64, 48));
        assert!(converted.data_uri().starts_with("data:image/jpeg;base64,"));
    }

    #[test]
    fn test_convert_applies_watermark() {
        let converted = convert_bytes(&bmp_bytes(500, 300), "a.bmp", OutputFormat::Png).unwrap();
        let decoded = image::load_from_memory(&converted.bytes).unwrap().to_rgba8();

        // 左上は元の色のまま
        assert_eq!(decoded.get_pixel(0, 0).0, [20, 40, 60, 255]);
        // 透かし領域（右下）に明るくなったピクセルがある
        let brighter = decoded
            .enumerate_pixels()
            .filter(|(_, y, _)| *y >= 270 && *y < 290)
            .any(|(_, _, p)| p[0] > 20);
        assert!(brighter, "透かしが見つからない");
    }

    #[test]
    fn test_convert_corrupt_bytes() {
        let err = convert_bytes(b"BM not really a bitmap", "x.bmp", OutputFormat::Png).unwrap_err();
        assert!(matches!(err, Error::Decode(_)));
    }

    #[test]
    fn test_flatten_on_black() {
        let mut canvas = RgbaImage::new(1, 1);
        canvas.put_pixel(0, 0, image::Rgba([200, 100, 50, 0]));
        assert_eq!(flatten_on_black(&canvas).get_pixel(0, 0).0, [0, 0, 0]);

        canvas.put_pixel(0, 0, image::Rgba([200, 100, 50, 255]));
        assert_eq!(flatten_on_black(&canvas).get_pixel(0, 0).0, [200, 100, 50]);
    }

    #[test]
    fn test_convert_file_reads_then_converts() {
        let job = ConversionJob {
            file: SelectedFile::new("campo.bmp", "image/bmp"),
            format: OutputFormat::Png,
        };
        let source = MemorySource(Ok(bmp_bytes(30, 30)));
        let converted = block_on(convert_file(&source, &job)).unwrap();
        assert_eq!(converted.file_name, "campo.png");
    }

    #[test]
    fn test_convert_file_read_error() {
        let job = ConversionJob {
            file: SelectedFile::new("campo.bmp", "image/bmp"),
            format: OutputFormat::Png,
        };
        let source = MemorySource(Err(Error::Read("permission denied".into())));
        let err = block_on(convert_file(&source, &job)).unwrap_err();
        assert!(matches!(err, Error::Read(_)));
    }
}
