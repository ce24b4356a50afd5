use mountpoint::prelude::*;

const CONFIG: &str = include_str!("../Mountpoint.toml");

// startup side effect: the container is created and mounted once, in `main`

#[cfg(target_family = "wasm")]
fn main() {
    if let Err(err) = mountpoint::start_with_toml(CONFIG, App) {
        wasm_bindgen::throw_val(err);
    }
}

#[cfg(not(target_family = "wasm"))]
fn main() -> anyhow::Result<()> {
    mountpoint::try_start_with_toml(CONFIG, &App)?.persist();
    Ok(())
}

struct App;

impl Component for App {
    fn render(&self) -> Node {
        let app = Node::element("div");
        app.set_class_name("app");

        let title = Node::element("h1");
        title.insert(&Node::text("Workshop"), None);
        app.insert(&title, None);

        let lessons = ["Ownership", "Borrowing", "Lifetimes"]
            .into_iter()
            .map(lesson)
            .collect::<Node>();
        let list = Node::element("ol");
        list.insert(&lessons, None);
        app.insert(&list, None);

        app
    }
}

fn lesson(name: &str) -> Node {
    let item = Node::element("li");
    item.insert(&Node::text(name), None);
    item
}
