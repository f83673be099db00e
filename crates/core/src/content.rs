use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One entry in a project's media gallery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MediaItem {
    Image { path: String },
    Video { path: String },
    Embed { url: String },
}

/// A single portfolio project record. Read-only display data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: u32,
    pub title: String,
    pub role: String,
    pub year: String,
    pub description: String,
    #[serde(default)]
    pub tech: Vec<String>,
    #[serde(default)]
    pub media: Vec<MediaItem>,
    #[serde(default)]
    pub try_it_url: Option<String>,
}

#[derive(Debug, Error)]
pub enum ContentError {
    #[error("invalid catalog json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("catalog has no projects")]
    Empty,
    #[error("duplicate project id {0}")]
    DuplicateId(u32),
    #[error("display order references unknown project id {0}")]
    UnknownId(u32),
}

/// On-disk catalog shape. `display_order` is optional; without it the
/// projects display in the order they are listed.
#[derive(Debug, Deserialize)]
struct Catalog {
    projects: Vec<Project>,
    #[serde(default)]
    display_order: Option<Vec<u32>>,
}

/// Read-only project catalog, held in display order.
///
/// The built-in catalog orders projects chronologically rather than by
/// id, so positions and ids diverge on purpose.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectStore {
    projects: Vec<Project>,
}

impl ProjectStore {
    /// Load and validate a user-supplied JSON catalog.
    pub fn from_json(data: &[u8]) -> Result<Self, ContentError> {
        let catalog: Catalog = serde_json::from_slice(data)?;
        if catalog.projects.is_empty() {
            return Err(ContentError::Empty);
        }
        let mut seen = Vec::with_capacity(catalog.projects.len());
        for project in &catalog.projects {
            if seen.contains(&project.id) {
                return Err(ContentError::DuplicateId(project.id));
            }
            seen.push(project.id);
        }

        let order = match catalog.display_order {
            Some(order) => order,
            None => seen,
        };
        let mut projects = Vec::with_capacity(order.len());
        for id in order {
            let Some(project) = catalog.projects.iter().find(|p| p.id == id) else {
                return Err(ContentError::UnknownId(id));
            };
            projects.push(project.clone());
        }
        Ok(Self { projects })
    }

    /// Number of projects in the catalog.
    pub fn len(&self) -> usize {
        self.projects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }

    /// All projects, in display order.
    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    /// Look up a project by content id.
    pub fn get(&self, id: u32) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }

    /// Project at a display position.
    pub fn by_position(&self, position: usize) -> Option<&Project> {
        self.projects.get(position)
    }

    /// Display position of a project id.
    pub fn position_of(&self, id: u32) -> Option<usize> {
        self.projects.iter().position(|p| p.id == id)
    }

    /// The built-in catalog: eight projects in fixed chronological
    /// display order (newest first).
    pub fn builtin() -> Self {
        let records = [
            (
                8,
                "WATER DROP SEQ",
                "SENSORY RESEARCH / UX-UI",
                "2026",
                "Developed in a sensory research lab focused on the sense of \
                 direction, exploring spatial awareness and orientation through \
                 visual and physical experimentation.",
                vec![],
                vec![
                    MediaItem::Embed {
                        url: "https://player.vimeo.com/video/1163956318".into(),
                    },
                    MediaItem::Image {
                        path: "waterdrop_seq/1.jpg".into(),
                    },
                    MediaItem::Image {
                        path: "waterdrop_seq/2.jpg".into(),
                    },
                ],
                Some("https://shakedkleter92-ux.github.io/waterdropsequencer/"),
            ),
            (
                5,
                "VICIOUS DELICIOUS",
                "INTERACTIVE DESIGN / UX-UI",
                "2026",
                "An interactive tribute to Vicious Delicious (2007), where users \
                 control music playback and visuals through real-time hand \
                 gestures, turning the album into a performative experience.",
                vec![],
                vec![
                    MediaItem::Embed {
                        url: "https://player.vimeo.com/video/1163953273".into(),
                    },
                    MediaItem::Image {
                        path: "interactive_album/interface.png".into(),
                    },
                ],
                None,
            ),
            (
                6,
                "LOONEY GOV",
                "INTERACTIVE DESIGN / UX-UI",
                "2026",
                "A humorous and critical interactive remix blending cartoon \
                 characters with government, using playfulness to comment on \
                 politics, power, and media culture.",
                vec![],
                vec![
                    MediaItem::Embed {
                        url: "https://player.vimeo.com/video/1163952661".into(),
                    },
                    MediaItem::Image {
                        path: "looney_gov/interface.png".into(),
                    },
                ],
                None,
            ),
            (
                4,
                "RE-FRAME",
                "VISUAL DESIGN",
                "2025",
                "An experimental interface challenging the concept of truth in \
                 digital media. Interactive layers of distortion reveal hidden \
                 messages.",
                vec!["REACT", "FRAMER_MOTION", "UX"],
                vec![
                    MediaItem::Embed {
                        url: "https://player.vimeo.com/video/1163953145".into(),
                    },
                    MediaItem::Image {
                        path: "reframe_media/still.jpg".into(),
                    },
                ],
                None,
            ),
            (
                2,
                "MONSTERS",
                "3D ARTIST",
                "2025",
                "A digital archive of procedurally generated creatures, \
                 exploring organic forms and synthetic textures.",
                vec!["BLENDER", "THREE.JS", "WEBGL"],
                vec![
                    MediaItem::Embed {
                        url: "https://player.vimeo.com/video/1163952952".into(),
                    },
                    MediaItem::Image {
                        path: "monsters_media/archive.png".into(),
                    },
                ],
                None,
            ),
            (
                3,
                "SPACETECH",
                "GAME DEV",
                "2025",
                "A retro-futuristic pixel art game interface, designed to \
                 simulate the control panel of a deep-space mining vessel.",
                vec!["ASEPRITE", "UNITY", "PIXEL_ART"],
                vec![
                    MediaItem::Embed {
                        url: "https://player.vimeo.com/video/1163953071".into(),
                    },
                    MediaItem::Image {
                        path: "spacetech_media/panel.png".into(),
                    },
                ],
                None,
            ),
            (
                7,
                "FREE TYPE",
                "TYPOGRAPHY DESIGN",
                "2025",
                "An experimental typography project combining ready-made \
                 letterforms from aerial agricultural imagery with a custom \
                 grid-based type system.",
                vec![],
                vec![
                    MediaItem::Embed {
                        url: "https://player.vimeo.com/video/1163952898".into(),
                    },
                    MediaItem::Image {
                        path: "free_type/alphabet.png".into(),
                    },
                ],
                None,
            ),
            (
                1,
                "CLICKBAIT",
                "UX/UI",
                "2024",
                "A fictional electro-pop artist with a fully branded digital \
                 identity: a responsive website, custom 3D visuals, and themed \
                 merchandise at the intersection of branding and storytelling.",
                vec!["P5.JS", "WEB_AUDIO_API", "GENERATIVE"],
                vec![
                    MediaItem::Embed {
                        url: "https://player.vimeo.com/video/1163952724".into(),
                    },
                    MediaItem::Image {
                        path: "web_media/hero.jpg".into(),
                    },
                ],
                None,
            ),
        ];

        let projects = records
            .into_iter()
            .map(
                |(id, title, role, year, description, tech, media, try_it_url)| Project {
                    id,
                    title: title.into(),
                    role: role.into(),
                    year: year.into(),
                    description: description.into(),
                    tech: tech.into_iter().map(String::from).collect(),
                    media,
                    try_it_url: try_it_url.map(String::from),
                },
            )
            .collect();
        Self { projects }
    }
}
