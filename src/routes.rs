use dioxus::prelude::*;
use dioxus_router::{Link, Routable, Router};

use crate::carousel::CertificateCarousel;
use crate::certificates::CertificateCatalog;
use crate::config::{use_runtime_config, CertificateLayout, RuntimeConfig};
use crate::contact::ContactForm;
use crate::cursor::CursorLayer;
use crate::gallery::CertificateGallery;
use crate::ignition::IgnitionButton;
use crate::navigation::{GearNav, MobileMenu, SECTIONS};
use crate::radar::SkillRadar;
use crate::reveal::{use_reveal_scope, Reveal};
use crate::splash::SplashScreen;
use crate::theme::{use_theme_provider, HighBeams, MobileThemeToggle, ThemeToggle};

const MAIN_CSS: Asset = asset!("/assets/main.css");

#[component]
pub fn App() -> Element {
    let config_resource = use_runtime_config();
    let config = match config_resource() {
        None => {
            return rsx! {
                document::Title { "Portfolio" }
                div { class: "page loading",
                    h1 { "Loading..." }
                }
            }
        }
        Some(Ok(config)) => config,
        Some(Err(message)) => {
            tracing::warn!("config: {message}; using defaults");
            RuntimeConfig::default()
        }
    };

    use_context_provider(|| config);

    rsx! {
        document::Link { rel: "stylesheet", href: MAIN_CSS }
        document::Meta { name: "theme-color", content: "#6366F1" }
        Router::<Route> {}
    }
}

#[derive(Clone, PartialEq, Routable)]
pub enum Route {
    #[route("/")]
    Home {},
    #[route("/:..route")]
    NotFound { route: Vec<String> },
}

#[component]
fn Home() -> Element {
    use_theme_provider();
    use_reveal_scope();
    let config = use_context::<RuntimeConfig>();
    let catalog = use_hook(CertificateCatalog::bundled);

    rsx! {
        document::Title { "Portfolio" }
        SplashScreen {}
        CursorLayer {}
        HighBeams {}
        header { class: "site-header fixed top-0 inset-x-0 z-40",
            nav { class: "container mx-auto flex items-center justify-between px-6 py-4",
                a { href: "#home", class: "brand font-mono font-bold", "VK" }
                div { class: "hidden md:flex items-center gap-8",
                    for entry in SECTIONS.iter() {
                        a { key: "{entry.section}", href: "{entry.target()}", class: "nav-link", "{entry.label}" }
                    }
                    ThemeToggle {}
                }
                div { class: "flex items-center gap-4 md:hidden",
                    MobileThemeToggle {}
                    MobileMenu {}
                }
            }
        }
        GearNav {}
        main {
            section { id: "home", class: "hero min-h-screen flex items-center",
                Reveal { id: "hero-intro", class: "container mx-auto px-6",
                    p { class: "font-mono text-primary text-sm mb-4", "// SYSTEM ONLINE" }
                    h1 { class: "text-5xl md:text-7xl font-bold mb-6", "Security. AI. Systems." }
                    p { class: "text-lg text-zinc-400 max-w-2xl mb-10",
                        "Building secure, intelligent software from the kernel up to the browser."
                    }
                    IgnitionButton {}
                }
            }
            section { id: "work", class: "section py-24",
                Reveal { id: "work-heading", class: "container mx-auto px-6",
                    h2 { class: "section-title", "Selected Work" }
                }
                div { class: "container mx-auto px-6 grid md:grid-cols-3 gap-6",
                    for project in PROJECTS.iter() {
                        Reveal { key: "{project.slug}", id: "project-{project.slug}", class: "project-card",
                            h3 { class: "text-xl font-bold mb-2", "{project.title}" }
                            p { class: "text-sm text-zinc-400", "{project.summary}" }
                        }
                    }
                }
            }
            section { id: "skills", class: "section py-24",
                Reveal { id: "skills-heading", class: "container mx-auto px-6",
                    h2 { class: "section-title", "Skill Matrix" }
                }
                div { class: "container mx-auto px-6 flex justify-center",
                    SkillRadar {}
                }
            }
            section { id: "certificates", class: "section py-24",
                Reveal { id: "certificates-heading", class: "container mx-auto px-6",
                    h2 { class: "section-title", "Certificates" }
                }
                div { class: "container mx-auto px-6",
                    match config.certificate_layout {
                        CertificateLayout::Carousel => rsx! { CertificateCarousel { catalog: catalog.clone() } },
                        CertificateLayout::Gallery => rsx! { CertificateGallery { catalog: catalog.clone() } },
                    }
                }
            }
            section { id: "contact", class: "section py-24",
                Reveal { id: "contact-heading", class: "container mx-auto px-6 max-w-3xl",
                    h2 { class: "section-title", "Get In Touch" }
                    ContactForm {}
                }
            }
        }
        footer { class: "site-footer py-8 text-center text-xs font-mono text-zinc-500",
            "© Vagish Kora"
        }
    }
}

struct Project {
    slug: &'static str,
    title: &'static str,
    summary: &'static str,
}

static PROJECTS: [Project; 3] = [
    Project {
        slug: "threat-lens",
        title: "Threat Lens",
        summary: "Log triage pipeline that flags anomalous sign-ins with a lightweight classifier.",
    },
    Project {
        slug: "vision-gate",
        title: "Vision Gate",
        summary: "Camera-based access control prototype with on-device face matching.",
    },
    Project {
        slug: "ledger-notary",
        title: "Ledger Notary",
        summary: "Document timestamping service anchored on a Hashgraph consensus topic.",
    },
];

#[component]
fn NotFound(route: Vec<String>) -> Element {
    let path = route.join("/");
    rsx! {
        document::Title { "Not Found | Portfolio" }
        div { class: "page not-found min-h-screen flex flex-col items-center justify-center gap-4",
            h1 { class: "text-4xl font-bold", "404" }
            p { class: "font-mono text-zinc-400", "Missing: /{path}" }
            Link { to: Route::Home {}, class: "nav-link text-primary", "Back home" }
        }
    }
}
