//! Event-driven decoders for listing responses.
//!
//! Each decoder owns its per-parse state: an explicit state enum, the
//! record currently being populated, and a text accumulator. Text may
//! arrive fragmented across several events and is concatenated; the
//! accumulator is cleared after every element close. Decoders are plain
//! values, freshly constructed per parse, and never shared.

use quick_xml::Reader;
use quick_xml::events::Event;
use tracing::trace;

use crate::error::XmlError;
use crate::types::{BucketSummary, ListEntry, Owner};

/// A decoder driven by element open/close/text events.
trait EventSink {
    type Output;

    fn open_element(&mut self, name: &str) -> Result<(), XmlError>;
    fn text(&mut self, chars: &str);
    fn close_element(&mut self, name: &str) -> Result<(), XmlError>;
    fn finish(self) -> Self::Output;
}

/// Decode a `ListBucketResult` document into its `Contents` entries, in
/// document order.
///
/// An empty document yields an empty collection.
///
/// # Errors
///
/// Returns [`XmlError`] if the XML is malformed, a `Size` value is not a
/// decimal integer, or an owner element appears outside a `Contents`
/// element.
pub fn decode_object_listing(xml: &[u8]) -> Result<Vec<ListEntry>, XmlError> {
    drive(xml, ObjectListingDecoder::default())
}

/// Decode a `ListAllMyBucketsResult` document into its `Bucket` records,
/// in document order.
///
/// # Errors
///
/// Returns [`XmlError`] if the XML is malformed.
pub fn decode_bucket_listing(xml: &[u8]) -> Result<Vec<BucketSummary>, XmlError> {
    drive(xml, BucketListingDecoder::default())
}

/// Pump reader events through a sink until end of document.
fn drive<S: EventSink>(xml: &[u8], mut sink: S) -> Result<S::Output, XmlError> {
    let mut reader = Reader::from_reader(xml);
    reader.config_mut().trim_text(true);

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                let name = e.name();
                sink.open_element(element_name(name.as_ref())?)?;
            }
            Event::Empty(e) => {
                let name = e.name();
                let name = element_name(name.as_ref())?.to_owned();
                sink.open_element(&name)?;
                sink.close_element(&name)?;
            }
            Event::Text(e) => {
                let unescaped = e.unescape().map_err(|err| XmlError::Parse(err.to_string()))?;
                sink.text(&unescaped);
            }
            Event::CData(e) => {
                let bytes = e.into_inner();
                let chars = std::str::from_utf8(&bytes)
                    .map_err(|err| XmlError::Parse(err.to_string()))?;
                sink.text(chars);
            }
            Event::End(e) => {
                let name = e.name();
                sink.close_element(element_name(name.as_ref())?)?;
            }
            Event::Eof => break,
            // Declarations, comments, processing instructions.
            _ => {}
        }
    }

    Ok(sink.finish())
}

fn element_name(raw: &[u8]) -> Result<&str, XmlError> {
    std::str::from_utf8(raw).map_err(|err| XmlError::Parse(err.to_string()))
}

// ---------------------------------------------------------------------------
// Object listing: ListBucketResult / Contents
// ---------------------------------------------------------------------------

/// Parser position within a `ListBucketResult` document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ObjectState {
    /// Between `Contents` elements.
    Idle,
    /// Inside a `Contents` element.
    Entry,
    /// Inside the `Owner` element of a `Contents` element.
    EntryOwner,
}

#[derive(Debug)]
struct ObjectListingDecoder {
    state: ObjectState,
    current: Option<ListEntry>,
    owner: Option<Owner>,
    text: String,
    entries: Vec<ListEntry>,
}

impl Default for ObjectListingDecoder {
    fn default() -> Self {
        Self {
            state: ObjectState::Idle,
            current: None,
            owner: None,
            text: String::new(),
            entries: Vec::new(),
        }
    }
}

impl ObjectListingDecoder {
    fn entry_mut(&mut self, tag: &str) -> Result<&mut ListEntry, XmlError> {
        self.current
            .as_mut()
            .ok_or_else(|| XmlError::UnexpectedElement(format!("{tag} outside Contents")))
    }
}

impl EventSink for ObjectListingDecoder {
    type Output = Vec<ListEntry>;

    fn open_element(&mut self, name: &str) -> Result<(), XmlError> {
        match name {
            "Contents" => {
                self.current = Some(ListEntry::default());
                self.state = ObjectState::Entry;
            }
            // The schema only nests Owner inside Contents; anywhere else
            // the document is not a ListBucketResult we understand.
            "Owner" => {
                if self.state != ObjectState::Entry {
                    return Err(XmlError::UnexpectedElement(
                        "Owner outside Contents".to_owned(),
                    ));
                }
                self.owner = Some(Owner::default());
                self.state = ObjectState::EntryOwner;
            }
            _ => trace!(element = name, "ignoring element"),
        }
        Ok(())
    }

    fn text(&mut self, chars: &str) {
        self.text.push_str(chars);
    }

    fn close_element(&mut self, name: &str) -> Result<(), XmlError> {
        match name {
            "Contents" => {
                let entry = self.current.take().ok_or_else(|| {
                    XmlError::UnexpectedElement("Contents close without open".to_owned())
                })?;
                self.entries.push(entry);
                self.state = ObjectState::Idle;
            }
            "Owner" if self.state == ObjectState::EntryOwner => {
                let owner = self.owner.take();
                self.entry_mut("Owner")?.owner = owner;
                self.state = ObjectState::Entry;
            }
            "Key" => {
                let text = std::mem::take(&mut self.text);
                self.entry_mut(name)?.key = text;
            }
            "LastModified" => {
                let text = std::mem::take(&mut self.text);
                self.entry_mut(name)?.last_modified = text;
            }
            "ETag" => {
                let text = std::mem::take(&mut self.text);
                self.entry_mut(name)?.etag = text;
            }
            "StorageClass" => {
                let text = std::mem::take(&mut self.text);
                self.entry_mut(name)?.storage_class = text;
            }
            "Size" => {
                let size = self
                    .text
                    .parse::<u64>()
                    .map_err(|err| XmlError::Parse(format!("invalid Size '{}': {err}", self.text)))?;
                self.entry_mut(name)?.size = size;
            }
            "ID" | "DisplayName" => {
                let text = std::mem::take(&mut self.text);
                let owner = self.owner.as_mut().ok_or_else(|| {
                    XmlError::UnexpectedElement(format!("{name} outside Owner"))
                })?;
                if name == "ID" {
                    owner.id = text;
                } else {
                    owner.display_name = text;
                }
            }
            _ => {}
        }
        self.text.clear();
        Ok(())
    }

    fn finish(self) -> Vec<ListEntry> {
        self.entries
    }
}

// ---------------------------------------------------------------------------
// Bucket listing: ListAllMyBucketsResult / Bucket
// ---------------------------------------------------------------------------

/// Parser position within a `ListAllMyBucketsResult` document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BucketState {
    /// Between `Bucket` elements. The account-level `Owner` block is
    /// ignored here.
    Idle,
    /// Inside a `Bucket` element.
    Bucket,
}

#[derive(Debug)]
struct BucketListingDecoder {
    state: BucketState,
    current: Option<BucketSummary>,
    text: String,
    buckets: Vec<BucketSummary>,
}

impl Default for BucketListingDecoder {
    fn default() -> Self {
        Self {
            state: BucketState::Idle,
            current: None,
            text: String::new(),
            buckets: Vec::new(),
        }
    }
}

impl EventSink for BucketListingDecoder {
    type Output = Vec<BucketSummary>;

    fn open_element(&mut self, name: &str) -> Result<(), XmlError> {
        if name == "Bucket" {
            self.current = Some(BucketSummary::default());
            self.state = BucketState::Bucket;
        } else {
            trace!(element = name, "ignoring element");
        }
        Ok(())
    }

    fn text(&mut self, chars: &str) {
        self.text.push_str(chars);
    }

    fn close_element(&mut self, name: &str) -> Result<(), XmlError> {
        match (name, self.state) {
            ("Bucket", _) => {
                let bucket = self.current.take().ok_or_else(|| {
                    XmlError::UnexpectedElement("Bucket close without open".to_owned())
                })?;
                self.buckets.push(bucket);
                self.state = BucketState::Idle;
            }
            ("Name", BucketState::Bucket) => {
                let text = std::mem::take(&mut self.text);
                if let Some(bucket) = self.current.as_mut() {
                    bucket.name = text;
                }
            }
            ("CreationDate", BucketState::Bucket) => {
                let text = std::mem::take(&mut self.text);
                if let Some(bucket) = self.current.as_mut() {
                    bucket.creation_date = text;
                }
            }
            _ => {}
        }
        self.text.clear();
        Ok(())
    }

    fn finish(self) -> Vec<BucketSummary> {
        self.buckets
    }
}
