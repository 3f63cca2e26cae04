//! Source page size from a PDF document

use anyhow::{Context, Result, anyhow, bail};
use lopdf::{Dictionary, Document, Object, ObjectId};
use poster_layout::SourcePage;
use std::path::Path;

/// Size of one page as it is displayed, `/Rotate` applied
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PdfPage {
    pub width_pt: f64,
    pub height_pt: f64,
}

impl SourcePage for PdfPage {
    fn width_pt(&self) -> f64 {
        self.width_pt
    }

    fn height_pt(&self) -> f64 {
        self.height_pt
    }
}

/// Load `path` and read the size of page `page_number` (1-based).
pub async fn load_page(path: impl AsRef<Path>, page_number: u32) -> Result<PdfPage> {
    let path = path.as_ref().to_owned();
    let bytes = tokio::fs::read(&path)
        .await
        .with_context(|| format!("reading {}", path.display()))?;
    let doc = tokio::task::spawn_blocking(move || Document::load_mem(&bytes))
        .await?
        .with_context(|| format!("parsing {}", path.display()))?;
    page_size(&doc, page_number)
}

/// Size of page `page_number` (1-based) of `doc`.
pub fn page_size(doc: &Document, page_number: u32) -> Result<PdfPage> {
    let pages = doc.get_pages();
    let page_id = *pages.get(&page_number).ok_or_else(|| {
        anyhow!(
            "page {} does not exist (document has {} pages)",
            page_number,
            pages.len()
        )
    })?;

    let media_box = inherited(doc, page_id, b"MediaBox")?
        .ok_or_else(|| anyhow!("page {page_number} has no MediaBox"))?;
    let corners = resolve(doc, media_box)?
        .as_array()
        .map_err(|_| anyhow!("MediaBox of page {page_number} is not an array"))?
        .iter()
        .map(|obj| extract_number(resolve(doc, obj).ok()?))
        .collect::<Option<Vec<f64>>>()
        .ok_or_else(|| anyhow!("MediaBox of page {page_number} is not numeric"))?;
    let &[x0, y0, x1, y1] = corners.as_slice() else {
        bail!("MediaBox of page {page_number} has {} entries", corners.len());
    };

    let rotate = match inherited(doc, page_id, b"Rotate")? {
        Some(obj) => extract_number(resolve(doc, obj)?).unwrap_or(0.0) as i64,
        None => 0,
    };

    let (width_pt, height_pt) = ((x1 - x0).abs(), (y1 - y0).abs());
    if rotate.rem_euclid(180) == 90 {
        Ok(PdfPage {
            width_pt: height_pt,
            height_pt: width_pt,
        })
    } else {
        Ok(PdfPage {
            width_pt,
            height_pt,
        })
    }
}

/// Look up `key` on the page, then up its `/Parent` chain.
fn inherited<'a>(doc: &'a Document, page_id: ObjectId, key: &[u8]) -> Result<Option<&'a Object>> {
    let mut dict: &Dictionary = doc.get_dictionary(page_id)?;
    // guards against reference cycles in broken files
    for _ in 0..64 {
        if let Ok(value) = dict.get(key) {
            return Ok(Some(value));
        }
        match dict.get(b"Parent").and_then(Object::as_reference) {
            Ok(parent) => dict = doc.get_dictionary(parent)?,
            Err(_) => return Ok(None),
        }
    }
    Ok(None)
}

fn resolve<'a>(doc: &'a Document, obj: &'a Object) -> Result<&'a Object> {
    match obj {
        Object::Reference(id) => Ok(doc.get_object(*id)?),
        other => Ok(other),
    }
}

/// Extract numeric value from a PDF object
fn extract_number(obj: &Object) -> Option<f64> {
    match obj {
        Object::Integer(i) => Some(*i as f64),
        Object::Real(r) => Some(f64::from(*r)),
        _ => None,
    }
}
