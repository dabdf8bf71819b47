use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Audio,
    Video,
}

impl MediaKind {
    /// Processing order within a category.
    pub const ALL: [MediaKind; 2] = [MediaKind::Audio, MediaKind::Video];

    pub fn dir_name(self) -> &'static str {
        match self {
            MediaKind::Audio => "audio",
            MediaKind::Video => "video",
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dir_name())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CategoryMedia {
    pub audio: Vec<String>,
    pub video: Vec<String>,
}

impl CategoryMedia {
    pub fn files(&self, kind: MediaKind) -> &[String] {
        match kind {
            MediaKind::Audio => &self.audio,
            MediaKind::Video => &self.video,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryEntry {
    pub name: String,
    #[serde(flatten)]
    pub media: CategoryMedia,
}

/// Ordered category table. Order is preserved for provisioning and output.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MediaManifest {
    pub categories: Vec<CategoryEntry>,
}

/// One (category, kind, filename) triple from the manifest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaceholderSpec<'a> {
    pub category: &'a str,
    pub kind: MediaKind,
    pub file_name: &'a str,
}

impl PlaceholderSpec<'_> {
    pub fn rel_path(&self) -> PathBuf {
        category_dir(Path::new(""), self.kind, self.category).join(self.file_name)
    }

    pub fn path_under(&self, root: &Path) -> PathBuf {
        category_dir(root, self.kind, self.category).join(self.file_name)
    }
}

pub fn category_dir(root: &Path, kind: MediaKind, category: &str) -> PathBuf {
    root.join(kind.dir_name()).join(category)
}

impl MediaManifest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_category<A, V>(mut self, name: &str, audio: A, video: V) -> Self
    where
        A: IntoIterator,
        A::Item: Into<String>,
        V: IntoIterator,
        V::Item: Into<String>,
    {
        self.categories.push(CategoryEntry {
            name: name.to_string(),
            media: CategoryMedia {
                audio: audio.into_iter().map(Into::into).collect(),
                video: video.into_iter().map(Into::into).collect(),
            },
        });
        self
    }

    /// The MindScope meditation library.
    pub fn default_meditation() -> Self {
        Self::new()
            .with_category(
                "morning",
                [
                    "gentle-piano.mp3",
                    "nature-sounds.mp3",
                    "bird-chirping.mp3",
                    "acoustic-guitar.mp3",
                ],
                ["sunrise-timelapse.mp4"],
            )
            .with_category(
                "breathing",
                [
                    "rhythmic-breathing.mp3",
                    "wind-chimes.mp3",
                    "ambient-tones.mp3",
                ],
                ["slow-waves.mp4"],
            )
            .with_category(
                "stress",
                ["calming-violin.mp3", "soft-rain.mp3", "gentle-harp.mp3"],
                ["rainfall-leaves.mp4"],
            )
            .with_category(
                "forest",
                [
                    "forest-ambience.mp3",
                    "rustling-leaves.mp3",
                    "bird-calls.mp3",
                    "flowing-creek.mp3",
                ],
                ["forest-canopy.mp4"],
            )
            .with_category(
                "evening",
                [
                    "soft-classical.mp3",
                    "gentle-wind.mp3",
                    "cricket-chirps.mp3",
                ],
                ["sunset-colors.mp4"],
            )
            .with_category(
                "ocean",
                [
                    "ocean-waves.mp3",
                    "seagull-calls.mp3",
                    "underwater-bubbles.mp3",
                ],
                ["ocean-underwater.mp4"],
            )
            .with_category(
                "mountain",
                [
                    "mountain-wind.mp3",
                    "distant-eagles.mp3",
                    "tibetan-bowls.mp3",
                ],
                ["mountain-vista.mp4"],
            )
            .with_category(
                "gratitude",
                [
                    "acoustic-guitar.mp3",
                    "soft-vocals.mp3",
                    "gentle-bells.mp3",
                ],
                ["golden-light.mp4"],
            )
    }

    pub fn category_count(&self) -> usize {
        self.categories.len()
    }

    pub fn count_of(&self, kind: MediaKind) -> usize {
        self.categories
            .iter()
            .map(|c| c.media.files(kind).len())
            .sum()
    }

    pub fn total_files(&self) -> usize {
        MediaKind::ALL.iter().map(|&k| self.count_of(k)).sum()
    }

    /// Every triple in manifest order: category by category, audio before video.
    pub fn placeholders(&self) -> impl Iterator<Item = PlaceholderSpec<'_>> {
        self.categories.iter().flat_map(|entry| {
            MediaKind::ALL.into_iter().flat_map(move |kind| {
                entry
                    .media
                    .files(kind)
                    .iter()
                    .map(move |file_name| PlaceholderSpec {
                        category: &entry.name,
                        kind,
                        file_name,
                    })
            })
        })
    }
}
