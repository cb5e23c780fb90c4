use encoding_rs::Encoding;
use html5ever::serialize::{serialize, SerializeOpts};
use markup5ever_rcdom::{RcDom, SerializableHandle};
use tracing::warn;

/// 序列化文档
///
/// The tree is serialized as UTF-8 and then re-encoded into
/// `document_encoding` when that names a known encoding.
pub fn serialize_document(dom: RcDom, document_encoding: &str) -> Vec<u8> {
    let mut buf: Vec<u8> = Vec::new();

    let serializable: SerializableHandle = dom.document.into();
    if let Err(e) = serialize(&mut buf, &serializable, SerializeOpts::default()) {
        warn!("Unable to serialize DOM into buffer: {e}");
    }

    if !document_encoding.is_empty() {
        if let Some(encoding) = Encoding::for_label(document_encoding.as_bytes()) {
            if encoding != encoding_rs::UTF_8 {
                let s: &str = &String::from_utf8_lossy(&buf);
                let (data, _, _) = encoding.encode(s);
                buf = data.into_owned();
            }
        }
    }

    buf
}
