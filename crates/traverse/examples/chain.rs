//! Chaining example - load a snapshot, walk it, edit it, print it

use dom::{DomSerializer, DomService};
use traverse::{predicates, Document, Query};

const PAGE: &str = r##"{
  "root": {
    "nodeType": 9,
    "nodeName": "#document",
    "children": [{
      "nodeType": 1,
      "nodeName": "UL",
      "attributes": ["id", "menu"],
      "children": [
        { "nodeType": 1, "nodeName": "LI", "attributes": ["class", "item"],
          "children": [{ "nodeType": 3, "nodeName": "#text", "nodeValue": "Home" }] },
        { "nodeType": 1, "nodeName": "LI", "attributes": ["class", "item active"],
          "children": [{ "nodeType": 3, "nodeName": "#text", "nodeValue": "Docs" }] },
        { "nodeType": 1, "nodeName": "LI", "attributes": ["class", "item"],
          "children": [{ "nodeType": 3, "nodeName": "#text", "nodeValue": "Blog" }] },
        { "nodeType": 1, "nodeName": "LI", "attributes": ["class", "item"],
          "children": [{ "nodeType": 3, "nodeName": "#text", "nodeValue": "About" }] }
      ]
    }]
  }
}"##;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let mut service = DomService::new();
    service.load_str(PAGE)?;
    let query = Query::new(Document::from(service));

    let items = query.select("#menu > .item")?;
    println!("Items: {:?}", items.text()?);

    // Everything after the active entry
    let after = query.select(".active")?.next_all();
    println!("After active: {:?}", after.text()?);

    // Stripe every other row and read the value back
    let striped = query
        .select(".item")?
        .filter_by(predicates::even)
        .set_css([("background-color", "#eee")])?;
    println!("Striped: {:?}", striped.text()?);
    println!("backgroundColor = {:?}", striped.css("backgroundColor")?);

    let menu = query.select(".active")?.closest("ul")?;
    println!("Closest list is #menu: {}", menu.is("#menu")?);

    query.select(".active")?.siblings().set_text("-")?;

    let serializer = DomSerializer::new();
    let document = query.document().borrow();
    println!("{}", serializer.serialize(&document)?);

    Ok(())
}
