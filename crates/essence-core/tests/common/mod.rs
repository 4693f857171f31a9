use essence_core::{
    BasicKind, Checkpoint, Element, ExtensionData, Store,
};
use serde_json::json;
use uuid::Uuid;

/// Create a new empty Store for testing
#[allow(dead_code)]
pub fn new_store() -> Store {
    Store::new()
}

/// Mint a fresh element id
#[allow(dead_code)]
pub fn fresh_id() -> String {
    Uuid::now_v7().to_string()
}

/// Insert a group with the given members (ids need not exist yet)
#[allow(dead_code)]
pub fn insert_group(store: &mut Store, id: &str, owned: &[&str], referred: &[&str]) {
    let mut group = Element::new_group(id.to_string(), id.to_string());
    {
        let data = group.as_group_mut().unwrap();
        for o in owned {
            data.add_owned_id(o.to_string());
        }
        for r in referred {
            data.add_referred_id(r.to_string());
        }
    }
    store.insert(group);
}

/// Insert an alpha with a description attribute and optional owner
#[allow(dead_code)]
pub fn insert_alpha(store: &mut Store, id: &str, name: &str, owner: Option<&str>) {
    let mut alpha = Element::new_basic(id.to_string(), name.to_string(), BasicKind::Alpha);
    alpha.owner = owner.map(str::to_string);
    alpha
        .attributes
        .set("description".to_string(), json!(format!("{} description", name)));
    store.insert(alpha);
}

/// Insert a state with checkpoints and an optional successor
#[allow(dead_code)]
pub fn insert_state(
    store: &mut Store,
    id: &str,
    name: &str,
    owner: Option<&str>,
    successor: Option<&str>,
    checkpoints: &[&str],
) {
    let mut state = Element::new_state(id.to_string(), name.to_string());
    state.owner = owner.map(str::to_string);
    {
        let data = state.as_state_mut().unwrap();
        data.successor = successor.map(str::to_string);
        for cp in checkpoints {
            data.add_checkpoint(Checkpoint::new(cp.to_string(), String::new()));
        }
    }
    store.insert(state);
}

/// Insert an extension active in `group`, targeting `target`'s attribute
#[allow(dead_code)]
pub fn insert_extension(
    store: &mut Store,
    id: &str,
    group: &str,
    target: &str,
    attribute: &str,
    function: &str,
) {
    let mut extension = Element::new_extension(
        id.to_string(),
        id.to_string(),
        ExtensionData::new(
            group.to_string(),
            target.to_string(),
            attribute.to_string(),
            function.to_string(),
        ),
    );
    extension.owner = Some(group.to_string());
    store.insert(extension);
}
