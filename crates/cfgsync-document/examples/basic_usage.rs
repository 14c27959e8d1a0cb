//! Basic usage example for cfgsync-document

use cfgsync_document::{DocPath, Document, DocumentNode, Format};

fn main() -> cfgsync_document::Result<()> {
    let source = r#"
name = "my-app"

[network]
port = 8080
"#;

    let mut doc = Document::parse_as(source, Format::Toml)?;
    println!("network.port = {:?}", doc.get(&DocPath::parse("network.port")));

    // Missing parents are created on write
    doc.set(&DocPath::parse("network.tls.enabled"), DocumentNode::Bool(true))?;
    doc.set(
        &DocPath::parse("network.hosts"),
        DocumentNode::List(vec!["alpha".into(), "beta".into()]),
    )?;

    // The same tree can be rendered in any supported format
    for format in [Format::Json, Format::Yaml, Format::Toml] {
        println!("--- {format} ---");
        println!("{}", doc.render_as(format)?);
    }

    Ok(())
}
