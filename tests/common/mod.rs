#![allow(dead_code)]

use lopdf::{Dictionary, Document, Object, Stream, dictionary};

/// A one-page document whose page uses `F1` (widths 500/250/722 for
/// `A`/`B`/`C`, declared with `LastChar` 68) and `F2` (no widths at all).
pub fn one_page(content: &str) -> Document {
    let mut doc = Document::with_version("1.5");
    let descriptor_id = doc.add_object(dictionary! {
        "Type" => "FontDescriptor",
        "FontName" => "ABCDEF+Helvetica",
    });
    let f1 = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "ABCDEF+Helvetica",
        "FirstChar" => 65i64,
        "LastChar" => 68i64,
        "Widths" => vec![Object::Integer(500), Object::Integer(250), Object::Integer(722)],
        "FontDescriptor" => descriptor_id,
    });
    let f2 = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
    });
    add_page(
        &mut doc,
        dictionary! { "F1" => f1, "F2" => f2 },
        content,
    );
    doc
}

pub fn add_page(doc: &mut Document, fonts: Dictionary, content: &str) {
    let pages_id = doc.new_object_id();
    let content_id = doc.add_object(Stream::new(dictionary! {}, content.as_bytes().to_vec()));
    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => content_id,
    });
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => vec![Object::Reference(page_id)],
            "Count" => 1i64,
            "Resources" => dictionary! { "Font" => fonts },
            "MediaBox" => vec![0, 0, 612, 792].into_iter().map(Object::Integer).collect::<Vec<_>>(),
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
}

/// The fragment written for one text run.
pub fn fragment(matrix: &str, x: &str, y: &str, size: &str, style: &str, fill: &str, text: &str) -> String {
    format!(
        "<g transform=\"matrix({matrix})\">\n\
         <text x=\"{x}\" y=\"{y}\" font-size=\"{size}\" stroke=\"none\" \
         style=\"{style}\" fill=\"{fill}\">{text}</text>\n\
         </g>\n"
    )
}
