//! Reading paths out of SVG documents, and writing scenes back as SVG.
//!
//! Only `<path>` elements are considered; all other content is skipped.

use std::io::{BufRead, Cursor, Write};

use log::{debug, warn};
use quick_xml::events::{BytesEnd, BytesStart, Event};
use quick_xml::{Reader, Writer};

use crate::errors::{Error, Result};
use crate::path::Path;
use crate::scene::{Scene, Shape};
use crate::TessellationConfig;

const SVG_NS: &str = "http://www.w3.org/2000/svg";

/// A `<path>` element which could not be imported.
#[derive(Debug)]
pub struct PathFailure {
    /// Zero-based index of the element among the document's `<path>` elements
    pub index: usize,
    pub id: Option<String>,
    pub error: Error,
}

/// Outcome of importing a document.
///
/// Paths which fail to parse or tessellate are excluded from `scene` and
/// listed in `failures`; the rest of the document is still imported.
#[derive(Debug, Default)]
pub struct ImportReport {
    pub scene: Scene,
    pub failures: Vec<PathFailure>,
}

impl ImportReport {
    /// True if every path in the document was imported.
    pub fn is_compatible(&self) -> bool {
        self.failures.is_empty()
    }

    /// The imported scene, or an `Error::Multi` listing every failure.
    pub fn into_result(self) -> Result<Scene> {
        if self.failures.is_empty() {
            Ok(self.scene)
        } else {
            Err(Error::Multi(
                self.failures
                    .into_iter()
                    .map(|f| (f.index, f.error))
                    .collect(),
            ))
        }
    }
}

struct PathElement {
    id: Option<String>,
    data: Option<String>,
}

impl PathElement {
    fn parse(&self, config: &TessellationConfig) -> Result<Path> {
        let data = self
            .data
            .as_deref()
            .ok_or_else(|| Error::Document("path element has no 'd' attribute".into()))?;
        Ok(Path::parse(data)?.with_config(config.clone()))
    }
}

impl TryFrom<&BytesStart<'_>> for PathElement {
    type Error = Error;

    fn try_from(e: &BytesStart) -> Result<Self> {
        let mut el = PathElement {
            id: None,
            data: None,
        };
        for attr in e.attributes() {
            let attr = attr.map_err(Error::from_err)?;
            let value = attr.unescape_value().map_err(Error::from_err)?.into_owned();
            match attr.key.into_inner() {
                b"id" => el.id = Some(value),
                b"d" => el.data = Some(value),
                _ => {}
            }
        }
        Ok(el)
    }
}

/// Read an SVG document, importing (and tessellating) each `<path>` element.
///
/// Malformed XML fails the whole import; a malformed or unsupported path
/// only fails that path.
pub fn import_reader(reader: &mut dyn BufRead, config: &TessellationConfig) -> Result<ImportReport> {
    import_reader_with(reader, config, 1)
}

/// As `import_reader`, tessellating the imported paths on up to `workers`
/// threads.
pub fn import_reader_with(
    reader: &mut dyn BufRead,
    config: &TessellationConfig,
    workers: usize,
) -> Result<ImportReport> {
    let mut reader = Reader::from_reader(reader);
    let mut buf = Vec::new();
    let mut report = ImportReport::default();
    // document index of each shape in `report.scene`
    let mut doc_index = Vec::new();
    let mut index = 0;

    loop {
        let ev = reader.read_event_into(&mut buf).map_err(|e| {
            Error::Document(format!(
                "XML error near position {}: {e:?}",
                reader.error_position()
            ))
        })?;
        match ev {
            Event::Eof => break,
            Event::Start(ref e) | Event::Empty(ref e) => {
                if e.local_name().as_ref() != b"path" {
                    debug!(
                        "skipping <{}>",
                        String::from_utf8_lossy(e.name().into_inner())
                    );
                } else {
                    let el = PathElement::try_from(e)?;
                    match el.parse(config) {
                        Ok(path) => {
                            report.scene.push(Shape { id: el.id, path });
                            doc_index.push(index);
                        }
                        Err(error) => {
                            warn!("path {index} not imported: {error}");
                            report.failures.push(PathFailure {
                                index,
                                id: el.id,
                                error,
                            });
                        }
                    }
                    index += 1;
                }
            }
            _ => {}
        }
        buf.clear();
    }

    let failed = report.scene.tessellate_parallel(workers);
    for (scene_idx, error) in failed.into_iter().rev() {
        let shape = report.scene.shapes.remove(scene_idx);
        report.failures.push(PathFailure {
            index: doc_index[scene_idx],
            id: shape.id,
            error,
        });
    }
    report.failures.sort_by_key(|f| f.index);
    debug!("imported {} of {index} paths", report.scene.len());
    Ok(report)
}

pub fn import_str(input: &str, config: &TessellationConfig) -> Result<ImportReport> {
    import_str_with(input, config, 1)
}

pub fn import_str_with(
    input: &str,
    config: &TessellationConfig,
    workers: usize,
) -> Result<ImportReport> {
    let mut input = Cursor::new(input.as_bytes());
    import_reader_with(&mut input, config, workers)
}

/// Write `scene` as an SVG document with one `<path>` per shape, using
/// canonical path data.
pub fn export_scene(scene: &Scene, writer: &mut dyn Write) -> Result<()> {
    let mut writer = Writer::new_with_indent(writer, b' ', 2);

    let mut svg = BytesStart::new("svg");
    svg.push_attribute(("xmlns", SVG_NS));
    if let Some(bbox) = scene.bbox() {
        let view_box = format!("{} {} {} {}", bbox.x1, bbox.y1, bbox.width(), bbox.height());
        svg.push_attribute(("viewBox", view_box.as_str()));
    }
    writer
        .write_event(Event::Start(svg))
        .map_err(Error::from_err)?;

    for shape in &scene.shapes {
        let mut el = BytesStart::new("path");
        if let Some(id) = &shape.id {
            el.push_attribute(("id", id.as_str()));
        }
        el.push_attribute(("d", shape.path.to_text().as_str()));
        writer.write_event(Event::Empty(el)).map_err(Error::from_err)?;
    }

    writer
        .write_event(Event::End(BytesEnd::new("svg")))
        .map_err(Error::from_err)?;
    writer.get_mut().write_all(b"\n")?;
    Ok(())
}

pub fn export_string(scene: &Scene) -> Result<String> {
    let mut output: Vec<u8> = vec![];
    export_scene(scene, &mut output)?;
    Ok(String::from_utf8(output)?)
}
