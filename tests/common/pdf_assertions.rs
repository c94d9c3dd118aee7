use lopdf::{Document as LopdfDocument, Object};
use std::collections::BTreeSet;

/// Get page dimensions (width, height) in points
pub fn get_page_dimensions(doc: &LopdfDocument, page_num: u32) -> Option<(f32, f32)> {
    let pages = doc.get_pages();
    let page_id = pages.get(&page_num)?;
    let page_dict = doc.get_object(*page_id).ok()?.as_dict().ok()?;
    let media_box = page_dict.get(b"MediaBox").ok()?.as_array().ok()?;
    if media_box.len() < 4 {
        return None;
    }
    let width = as_number(&media_box[2])? - as_number(&media_box[0])?;
    let height = as_number(&media_box[3])? - as_number(&media_box[1])?;
    Some((width, height))
}

fn as_number(object: &Object) -> Option<f32> {
    match object {
        Object::Integer(i) => Some(*i as f32),
        Object::Real(r) => Some(*r),
        _ => None,
    }
}

/// Base font names of every font dictionary in the file, subset tags removed
pub fn extract_font_names(doc: &LopdfDocument) -> BTreeSet<String> {
    let mut names = BTreeSet::new();
    for object in doc.objects.values() {
        let Ok(dict) = object.as_dict() else { continue };
        let is_font = dict
            .get(b"Type")
            .and_then(|t| t.as_name())
            .is_ok_and(|t| t == b"Font");
        if !is_font {
            continue;
        }
        if let Ok(base) = dict.get(b"BaseFont").and_then(|b| b.as_name()) {
            let name = String::from_utf8_lossy(base);
            // "ABCDEF+Family-Style" -> "Family-Style"
            let name = name.split_once('+').map_or(&*name, |(_, rest)| rest);
            names.insert(name.to_string());
        }
    }
    names
}

/// Assert that some embedded font name contains `needle` (case-insensitive)
#[macro_export]
macro_rules! assert_pdf_uses_font {
    ($pdf:expr, $needle:expr) => {
        let fonts = $crate::common::pdf_assertions::extract_font_names(&$pdf.doc);
        let needle = $needle.to_lowercase();
        assert!(
            fonts.iter().any(|f| f.to_lowercase().contains(&needle)),
            "PDF should use a font matching '{}', found: {:?}",
            $needle,
            fonts
        );
    };
}
