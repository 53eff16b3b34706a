// Free-Text Editor
// Drives a host markup surface and keeps a linear undo/redo history of its
// content. Every content-changing action ends in exactly one capture of the
// surface, so it adds at most one snapshot.

use std::path::Path;

use super::format::FormatCommand;
use super::history::History;
use super::image::{ImageUploader, image_source, read_image};
use super::surface::MarkupSurface;
use crate::config::EditorConfig;
use crate::error::EditorError;

pub struct FreeTextEditor<S: MarkupSurface> {
    surface: S,
    history: History,
}

impl<S: MarkupSurface> FreeTextEditor<S> {
    /// Create an editor showing `initial` on `surface`
    pub fn new(surface: S, initial: &str) -> Self {
        Self::with_history(surface, History::new(initial))
    }

    pub fn with_config(surface: S, initial: &str, config: &EditorConfig) -> Self {
        Self::with_history(surface, History::with_limit(initial, config.history_limit))
    }

    fn with_history(mut surface: S, history: History) -> Self {
        surface.set_current_markup(history.current());
        FreeTextEditor { surface, history }
    }

    /// The live content (the snapshot under the history cursor)
    pub fn content(&self) -> &str {
        self.history.current()
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Mutable access to the surface, e.g. to move its selection or type
    /// into it. Call [`sync`](Self::sync) afterwards to record typed text.
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn into_surface(self) -> S {
        self.surface
    }

    /// Capture the surface's markup as a new snapshot.
    /// Returns false when it equals the live content.
    pub fn sync(&mut self) -> bool {
        let markup = self.surface.current_markup();
        self.history.record(&markup)
    }

    /// Apply a formatting command and record the result.
    ///
    /// Link and image commands with an empty target are ignored, matching a
    /// cancelled URL prompt.
    pub fn apply(&mut self, command: FormatCommand) -> bool {
        if command.is_empty_target() {
            log::debug!("Ignoring {command:?} with empty target");
            return false;
        }
        self.surface.apply_format(&command);
        self.sync()
    }

    pub fn bold(&mut self) -> bool {
        self.apply(FormatCommand::Bold)
    }

    pub fn italic(&mut self) -> bool {
        self.apply(FormatCommand::Italic)
    }

    pub fn heading1(&mut self) -> bool {
        self.apply(FormatCommand::Heading1)
    }

    pub fn heading2(&mut self) -> bool {
        self.apply(FormatCommand::Heading2)
    }

    pub fn quote(&mut self) -> bool {
        self.apply(FormatCommand::Quote)
    }

    pub fn indent(&mut self) -> bool {
        self.apply(FormatCommand::Indent)
    }

    pub fn insert_text(&mut self, text: &str) -> bool {
        self.apply(FormatCommand::InsertText(text.to_string()))
    }

    pub fn insert_link(&mut self, url: &str) -> bool {
        self.apply(FormatCommand::Link {
            url: url.to_string(),
        })
    }

    pub fn insert_image_url(&mut self, url: &str) -> bool {
        self.apply(FormatCommand::Image {
            src: url.to_string(),
        })
    }

    /// Insert an image picked from disk.
    ///
    /// The file is uploaded when an uploader is given, otherwise (or when the
    /// upload fails) it is embedded as a data URL. A file that cannot be read
    /// is reported and leaves the editor untouched.
    pub fn insert_image_file(
        &mut self,
        path: &Path,
        uploader: Option<&dyn ImageUploader>,
    ) -> Result<bool, EditorError> {
        let file = read_image(path)?;
        let src = image_source(&file, uploader);
        Ok(self.apply(FormatCommand::Image { src }))
    }

    /// Step back one snapshot and show it on the surface.
    /// Text typed into the surface since the last capture is recorded first,
    /// so it can be redone. Returns false if there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        self.sync();
        match self.history.undo() {
            Some(snapshot) => {
                self.surface.set_current_markup(snapshot);
                true
            }
            None => false,
        }
    }

    /// Step forward one snapshot and show it on the surface.
    /// Uncaptured typed text counts as a new edit and ends the redo branch.
    /// Returns false if there is nothing to redo.
    pub fn redo(&mut self) -> bool {
        self.sync();
        match self.history.redo() {
            Some(snapshot) => {
                self.surface.set_current_markup(snapshot);
                true
            }
            None => false,
        }
    }

    /// Record any pending typed input and return the live content.
    /// History is kept, so editing can continue after saving.
    pub fn save(&mut self) -> String {
        self.sync();
        self.history.current().to_string()
    }
}
