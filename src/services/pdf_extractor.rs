//! PDF 图片导出服务 - 业务能力层
//!
//! 遍历 PDF 每一页的 `XObject` 资源，把其中的图片保存为 PNG，
//! 文件名为图片在资源字典中的名称（如 `Im0.png`）。
//! 不与 HTML 截图做任何比较。

use std::path::{Path, PathBuf};

use image::{DynamicImage, GrayImage, ImageFormat, RgbImage};
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};
use tracing::{debug, warn};

use crate::error::{AppResult, AuditError};

/// 页面树向上查找继承资源的最大层数
const MAX_PAGE_TREE_DEPTH: usize = 32;

/// 导出 PDF 中嵌入的所有图片，返回写入的文件路径
///
/// 无法解码的图片会被跳过并记录警告。
pub fn extract_pdf_images(pdf_path: &Path, output_dir: &Path) -> AppResult<Vec<PathBuf>> {
    let doc = Document::load(pdf_path).map_err(|e| AuditError::pdf(pdf_path, e))?;
    std::fs::create_dir_all(output_dir).map_err(|e| AuditError::io(output_dir, e))?;

    let mut written = Vec::new();
    for (page_number, page_id) in doc.get_pages() {
        for (name, stream) in page_images(&doc, page_id) {
            let image = match decode_image(&doc, &name, stream) {
                Ok(image) => image,
                Err(e) => {
                    warn!("第 {} 页: 跳过图片: {}", page_number, e);
                    continue;
                }
            };

            let path = output_dir.join(format!("{}.png", name));
            image
                .save_with_format(&path, ImageFormat::Png)
                .map_err(|e| AuditError::io(&path, std::io::Error::other(e)))?;
            debug!("第 {} 页: 已导出 {}", page_number, path.display());
            written.push(path);
        }
    }

    Ok(written)
}

fn resolve<'a>(doc: &'a Document, object: &'a Object) -> Option<&'a Object> {
    match object {
        Object::Reference(id) => doc.get_object(*id).ok(),
        other => Some(other),
    }
}

/// 页面的资源字典，页面自身没有时沿 `Parent` 向上继承
fn page_resources(doc: &Document, page_id: ObjectId) -> Option<&Dictionary> {
    let mut node = doc.get_dictionary(page_id).ok()?;

    for _ in 0..MAX_PAGE_TREE_DEPTH {
        if let Some(Object::Dictionary(resources)) =
            node.get(b"Resources").ok().and_then(|o| resolve(doc, o))
        {
            return Some(resources);
        }
        let parent = node.get(b"Parent").and_then(Object::as_reference).ok()?;
        node = doc.get_dictionary(parent).ok()?;
    }

    None
}

fn page_images(doc: &Document, page_id: ObjectId) -> Vec<(String, &Stream)> {
    let Some(resources) = page_resources(doc, page_id) else {
        return Vec::new();
    };
    let Some(Object::Dictionary(xobjects)) =
        resources.get(b"XObject").ok().and_then(|o| resolve(doc, o))
    else {
        return Vec::new();
    };

    xobjects
        .iter()
        .filter_map(|(name, object)| match resolve(doc, object) {
            Some(Object::Stream(stream)) if is_image(stream) => {
                Some((String::from_utf8_lossy(name).into_owned(), stream))
            }
            _ => None,
        })
        .collect()
}

fn is_image(stream: &Stream) -> bool {
    stream
        .dict
        .get(b"Subtype")
        .and_then(Object::as_name)
        .map(|subtype| subtype == b"Image")
        .unwrap_or(false)
}

fn stream_filters(dict: &Dictionary) -> Vec<String> {
    let name = |bytes: &[u8]| String::from_utf8_lossy(bytes).into_owned();
    match dict.get(b"Filter") {
        Ok(Object::Name(filter)) => vec![name(filter)],
        Ok(Object::Array(filters)) => filters
            .iter()
            .filter_map(|f| f.as_name().ok())
            .map(name)
            .collect(),
        _ => Vec::new(),
    }
}

fn decode_image(doc: &Document, name: &str, stream: &Stream) -> AppResult<DynamicImage> {
    let unsupported = |detail: String| AuditError::UnsupportedImage {
        name: name.to_string(),
        detail,
    };

    let filters = stream_filters(&stream.dict);
    let filters: Vec<&str> = filters.iter().map(String::as_str).collect();

    match filters.as_slice() {
        ["DCTDecode"] => image::load_from_memory_with_format(&stream.content, ImageFormat::Jpeg)
            .map_err(|e| unsupported(e.to_string())),
        ["FlateDecode", "DCTDecode"] => {
            let jpeg = stream
                .decompressed_content()
                .map_err(|e| unsupported(e.to_string()))?;
            image::load_from_memory_with_format(&jpeg, ImageFormat::Jpeg)
                .map_err(|e| unsupported(e.to_string()))
        }
        [] => decode_raster(doc, name, &stream.dict, &stream.content),
        ["FlateDecode"] => {
            let data = stream
                .decompressed_content()
                .map_err(|e| unsupported(e.to_string()))?;
            decode_raster(doc, name, &stream.dict, &data)
        }
        other => Err(unsupported(format!("不支持的编码 {:?}", other))),
    }
}

/// `ColorSpace` 对应的通道数，只接受 DeviceGray / DeviceRGB / DeviceCMYK
/// 及通道数为 1、3、4 的 ICCBased
fn color_channels(doc: &Document, dict: &Dictionary) -> Result<usize, String> {
    let space = dict
        .get(b"ColorSpace")
        .ok()
        .and_then(|o| resolve(doc, o))
        .ok_or_else(|| "缺少 ColorSpace".to_string())?;

    let (family, params) = match space {
        Object::Name(name) => (name.as_slice(), &[][..]),
        Object::Array(items) => match items.split_first() {
            Some((Object::Name(name), rest)) => (name.as_slice(), rest),
            _ => return Err("无法识别的 ColorSpace".to_string()),
        },
        _ => return Err("无法识别的 ColorSpace".to_string()),
    };

    match family {
        b"DeviceGray" => Ok(1),
        b"DeviceRGB" => Ok(3),
        b"DeviceCMYK" => Ok(4),
        b"ICCBased" => {
            let n = params
                .first()
                .and_then(|o| resolve(doc, o))
                .and_then(|o| o.as_stream().ok())
                .and_then(|profile| profile.dict.get(b"N").and_then(Object::as_i64).ok())
                .ok_or_else(|| "ICCBased 缺少 N".to_string())?;
            match n {
                1 | 3 | 4 => Ok(n as usize),
                other => Err(format!("不支持 {} 通道的 ICCBased", other)),
            }
        }
        other => Err(format!(
            "不支持的 ColorSpace {}",
            String::from_utf8_lossy(other)
        )),
    }
}

/// 解码 8 位灰度 / RGB / CMYK 像素数据，通道数由 `ColorSpace` 决定
fn decode_raster(
    doc: &Document,
    name: &str,
    dict: &Dictionary,
    data: &[u8],
) -> AppResult<DynamicImage> {
    let unsupported = |detail: String| AuditError::UnsupportedImage {
        name: name.to_string(),
        detail,
    };
    let dimension = |key: &[u8]| {
        dict.get(key)
            .and_then(Object::as_i64)
            .ok()
            .and_then(|v| u32::try_from(v).ok())
            .filter(|v| *v > 0)
    };

    let (Some(width), Some(height)) = (dimension(b"Width"), dimension(b"Height")) else {
        return Err(unsupported("缺少 Width/Height".to_string()));
    };
    let bits = dict
        .get(b"BitsPerComponent")
        .and_then(Object::as_i64)
        .unwrap_or(8);
    if bits != 8 {
        return Err(unsupported(format!("不支持 {} 位颜色", bits)));
    }

    let channels = color_channels(doc, dict).map_err(unsupported)?;
    let expected = width as usize * height as usize * channels;
    if data.len() < expected {
        return Err(unsupported(format!(
            "像素数据不足: 需要 {} 字节，实际 {} 字节",
            expected,
            data.len()
        )));
    }
    let data = &data[..expected];

    let image = match channels {
        1 => GrayImage::from_raw(width, height, data.to_vec()).map(DynamicImage::ImageLuma8),
        3 => RgbImage::from_raw(width, height, data.to_vec()).map(DynamicImage::ImageRgb8),
        4 => RgbImage::from_raw(width, height, cmyk_to_rgb(data)).map(DynamicImage::ImageRgb8),
        n => return Err(unsupported(format!("无法识别的通道数 {}", n))),
    };

    image.ok_or_else(|| unsupported("像素数据长度不匹配".to_string()))
}

fn cmyk_to_rgb(data: &[u8]) -> Vec<u8> {
    data.chunks_exact(4)
        .flat_map(|px| {
            let k = 255 - px[3] as u16;
            [
                ((255 - px[0] as u16) * k / 255) as u8,
                ((255 - px[1] as u16) * k / 255) as u8,
                ((255 - px[2] as u16) * k / 255) as u8,
            ]
        })
        .collect()
}
