mod browser;
mod carousel;
mod certificates;
mod config;
mod contact;
mod cursor;
mod forms;
mod gallery;
mod ignition;
mod navigation;
mod preferences;
mod radar;
mod reveal;
mod routes;
mod splash;
mod theme;

fn main() {
    dioxus::launch(routes::App);
}
