use form_builder::factory::defaults::default_content;
use form_builder::model::element::{Content, ElementList, ElementType, FormElement, Row, RowLayout};

/// Leaf node with the factory defaults of `tag`.
pub fn leaf(id: &str, tag: &str, name: &str) -> FormElement {
    FormElement::new(id, name, default_content(&ElementType::parse(tag)))
}

/// Layout row whose slots hold the given nodes. Slots are stored as given,
/// without padding, so tests can build malformed rows on purpose.
pub fn row(id: &str, layout: RowLayout, columns: Vec<Vec<FormElement>>) -> FormElement {
    let columns = columns.into_iter().map(ElementList::from_elements).collect();
    FormElement::new(id, "", Content::Row(Row { layout, columns }))
}

pub fn forest(elements: Vec<FormElement>) -> ElementList {
    ElementList::from_elements(elements)
}

/// `[name(1), row(5: [a(2)], [], [b(3), c(4)]), email(6)]`
pub fn sample_forest() -> ElementList {
    forest(vec![
        leaf("1", "text", "Full Name"),
        row(
            "5",
            RowLayout::ThreeColumns,
            vec![
                vec![leaf("2", "text", "City")],
                vec![],
                vec![leaf("3", "number", "Age"), leaf("4", "select", "Country")],
            ],
        ),
        leaf("6", "email", "Email"),
    ])
}

/// Ids of every node in search order.
pub fn ids(list: &ElementList) -> Vec<String> {
    let mut out = Vec::new();
    form_builder::tree::navigator::walk(list, &mut |node, _| out.push(node.id.to_string()));
    out
}
