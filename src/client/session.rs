use std::collections::{HashMap, HashSet};

use super::transport::Transport;
use crate::{
    error::Error,
    listing::{self, base_name, is_sentinel, join, Entry, EntryKind, ListingKey},
};

/// Ordering applied to flat name listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NameOrder {
    #[default]
    Ascending,
    Descending,
}

/// One listed directory level: its path prefix and the parsed lines.
struct Level {
    prefix: String,
    parsed: Vec<(String, Entry)>,
}

/// Deletion walk frames. `Finish` is only pushed once every child of the
/// directory has a `Visit` frame above it, which guarantees post-order.
enum RemoveFrame {
    Visit(String),
    Finish(String),
}

/// Tree-wide operations assembled from the flat primitives a [`Transport`]
/// affords.
///
/// The protocol has no recursive listing, so every recursive call here is
/// built from repeated single-level requests. Traversal is iterative over an
/// explicit stack, one transport call at a time, so remote depth never grows
/// the call stack and sibling listings never overlap.
pub struct TreeSession<T: Transport> {
    transport: T,
}

impl<T: Transport> TreeSession<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    /// Gives back the wrapped transport.
    pub fn into_inner(self) -> T {
        self.transport
    }

    /// Flat or recursive name listing with `.`/`..` filtered out.
    ///
    /// In recursive mode every name is probed with a change-directory round
    /// trip, the only reliable directory test the protocol affords;
    /// directories are recorded and descended into, and the flattened,
    /// deduplicated result is sorted per `order`.
    pub async fn list_names(
        &mut self,
        directory: &str,
        recursive: bool,
        order: NameOrder,
    ) -> Result<Vec<String>, Error> {
        if !recursive {
            let mut names: Vec<String> = self
                .names(directory)
                .await?
                .into_iter()
                .filter(|name| !is_sentinel(base_name(name)))
                .collect();
            apply_order(&mut names, order);
            return Ok(names);
        }

        let mut result = Vec::new();
        let mut seen = HashSet::new();
        let mut listed = HashSet::new();
        let mut stack = vec![directory.to_string()];

        while let Some(dir) = stack.pop() {
            if !listed.insert(dir.clone()) {
                continue;
            }

            for name in self.names(&dir).await? {
                if is_sentinel(base_name(&name)) {
                    continue;
                }

                let path = prefixed(&dir, name);
                if self.is_directory(&path).await? {
                    if seen.insert(path.clone()) {
                        result.push(path.clone());
                        stack.push(path);
                    }
                } else if seen.insert(path.clone()) {
                    result.push(path);
                }
            }
        }

        apply_order(&mut result, order);
        Ok(result)
    }

    /// Normalized entries for a directory and, when recursive, all its
    /// descendants, in listing order followed by each subdirectory's
    /// subtree depth-first.
    pub async fn list_detailed(
        &mut self,
        directory: &str,
        recursive: bool,
    ) -> Result<Vec<Entry>, Error> {
        let levels = self.traverse(directory, recursive).await?;
        Ok(levels
            .into_iter()
            .flat_map(|level| level.parsed.into_iter().map(|(_, entry)| entry))
            .collect())
    }

    /// Raw listing lines keyed by `type#path` across the subtree.
    pub async fn list_raw(
        &mut self,
        directory: &str,
        recursive: bool,
    ) -> Result<HashMap<ListingKey, String>, Error> {
        let levels = self.traverse(directory, recursive).await?;
        let mut items = HashMap::new();

        for level in levels {
            for (line, entry) in level.parsed {
                let key = ListingKey::new(entry.kind, join(&level.prefix, &entry.name));
                let _ = items.entry(key).or_insert(line);
            }
        }

        Ok(items)
    }

    /// Total size in bytes over the subtree; entries reported without a
    /// size (directories, notably) count as zero.
    pub async fn size(&mut self, directory: &str, recursive: bool) -> Result<u64, Error> {
        Ok(self
            .list_detailed(directory, recursive)
            .await?
            .iter()
            .filter_map(|entry| entry.size)
            .sum())
    }

    /// Number of items in a directory, optionally restricted to one kind.
    /// The unrestricted count uses the flat name aggregation, a kind filter
    /// needs the structured one.
    pub async fn count(
        &mut self,
        directory: &str,
        kind: Option<EntryKind>,
        recursive: bool,
    ) -> Result<usize, Error> {
        match kind {
            None => Ok(self
                .list_names(directory, recursive, NameOrder::Ascending)
                .await?
                .len()),
            Some(kind) => Ok(self
                .list_detailed(directory, recursive)
                .await?
                .iter()
                .filter(|entry| entry.kind == kind)
                .count()),
        }
    }

    pub async fn is_empty(&mut self, directory: &str) -> Result<bool, Error> {
        Ok(self.count(directory, None, false).await? == 0)
    }

    /// Probes `path` by changing into it and back. The previous location is
    /// restored before returning on every exit path.
    pub async fn is_directory(&mut self, path: &str) -> Result<bool, Error> {
        let saved = self.transport.current_directory().await?;
        let entered = self.transport.change_directory(path).await;

        if entered && !self.transport.change_directory(&saved).await {
            warn!("failed to restore remote directory `{saved}`");
        }

        Ok(entered)
    }

    /// Removes a file, or a directory when the direct delete is refused.
    ///
    /// `.`/`..` are always refused. With `recursive` a directory is emptied
    /// with a post-order walk (every child removed before its parent,
    /// siblings in descending name order) and then removed itself. A refused
    /// deletion is an in-band `false`, not an error, so best-effort cleanup
    /// continues over siblings; only listing failures abort the walk.
    pub async fn remove(&mut self, path: &str, recursive: bool) -> Result<bool, Error> {
        if path.is_empty() || is_sentinel(base_name(path)) {
            return Ok(false);
        }

        if self.transport.delete_file(path).await {
            return Ok(true);
        }

        if !self.is_directory(path).await? {
            return Ok(false);
        }

        if !recursive {
            return Ok(self.transport.remove_directory(path).await);
        }

        let mut removed = true;
        let mut stack = vec![RemoveFrame::Finish(path.to_string())];
        self.push_children(path, &mut stack).await?;

        while let Some(frame) = stack.pop() {
            match frame {
                RemoveFrame::Visit(p) => {
                    if self.transport.delete_file(&p).await {
                        continue;
                    }

                    if self.is_directory(&p).await? {
                        stack.push(RemoveFrame::Finish(p.clone()));
                        self.push_children(&p, &mut stack).await?;
                    } else {
                        removed = false;
                    }
                }
                RemoveFrame::Finish(p) => {
                    removed &= self.transport.remove_directory(&p).await;
                }
            }
        }

        Ok(removed)
    }

    /// Creates a directory, with `recursive` creating missing intermediate
    /// segments by changing into each and creating it on refusal. The
    /// working directory is restored afterwards regardless of outcome.
    pub async fn create_dir(&mut self, path: &str, recursive: bool) -> Result<bool, Error> {
        if !recursive || self.transport.list_names(path).await.is_ok() {
            return Ok(self.transport.create_directory(path).await);
        }

        let saved = self.transport.current_directory().await?;
        let mut created = false;

        for segment in path.split('/').filter(|s| !s.is_empty()) {
            if self.transport.change_directory(segment).await {
                continue;
            }

            created = self.transport.create_directory(segment).await;
            if !self.transport.change_directory(segment).await {
                created = false;
                break;
            }
        }

        if !self.transport.change_directory(&saved).await {
            warn!("failed to restore remote directory `{saved}`");
        }

        Ok(created)
    }

    /// Depth-first pre-order walk over raw listings. A visited set makes
    /// sure no directory is listed twice within one traversal, so merged
    /// keys cannot collide and a listing that repeats a subdirectory cannot
    /// loop.
    async fn traverse(&mut self, directory: &str, recursive: bool) -> Result<Vec<Level>, Error> {
        let mut levels = Vec::new();
        let mut visited = HashSet::new();
        let mut stack = vec![directory.to_string()];

        while let Some(dir) = stack.pop() {
            if !visited.insert(dir.clone()) {
                continue;
            }

            let mut parsed = Vec::new();
            let mut subdirs = Vec::new();

            for line in self.raw_lines(&dir).await? {
                match listing::parse_line(&line) {
                    Ok(entry) if entry.name.is_empty() || is_sentinel(&entry.name) => {}
                    Ok(entry) => {
                        if recursive && entry.kind == EntryKind::Directory {
                            subdirs.push(join(&dir, &entry.name));
                        }
                        parsed.push((line, entry));
                    }
                    Err(err) => debug!("skipping line under `{dir}`: {err}"),
                }
            }

            levels.push(Level { prefix: dir, parsed });

            // reversed so the first subdirectory in listing order pops first
            for sub in subdirs.into_iter().rev() {
                stack.push(sub);
            }
        }

        Ok(levels)
    }

    /// Pushes `Visit` frames for the children of `dir`, ascending on the
    /// stack so they pop off in descending name order.
    async fn push_children(
        &mut self,
        dir: &str,
        stack: &mut Vec<RemoveFrame>,
    ) -> Result<(), Error> {
        for child in self.list_names(dir, false, NameOrder::Ascending).await? {
            stack.push(RemoveFrame::Visit(prefixed(dir, child)));
        }
        Ok(())
    }

    async fn raw_lines(&mut self, directory: &str) -> Result<Vec<String>, Error> {
        if !directory.contains(' ') {
            return self.transport.list_raw_lines(directory).await;
        }

        // Some servers cannot parse a listing target containing whitespace,
        // so the directory is entered explicitly and listed with an empty
        // argument, restoring the previous location afterwards.
        let saved = self.transport.current_directory().await?;
        if !self.transport.change_directory(directory).await {
            return Err(Error::NotADirectory(directory.to_string()));
        }

        let lines = self.transport.list_raw_lines("").await;
        if !self.transport.change_directory(&saved).await {
            warn!("failed to restore remote directory `{saved}`");
        }

        lines
    }

    async fn names(&mut self, directory: &str) -> Result<Vec<String>, Error> {
        if !directory.contains(' ') {
            return self.transport.list_names(directory).await;
        }

        let saved = self.transport.current_directory().await?;
        if !self.transport.change_directory(directory).await {
            return Err(Error::NotADirectory(directory.to_string()));
        }

        let names = self.transport.list_names("").await;
        if !self.transport.change_directory(&saved).await {
            warn!("failed to restore remote directory `{saved}`");
        }

        names
    }
}

/// Joins a listed name under its directory unless the transport already
/// returned it prefixed.
fn prefixed(dir: &str, name: String) -> String {
    if name.starts_with(&format!("{dir}/")) {
        name
    } else {
        join(dir, &name)
    }
}

fn apply_order(names: &mut [String], order: NameOrder) {
    match order {
        NameOrder::Ascending => names.sort_unstable(),
        NameOrder::Descending => names.sort_unstable_by(|a, b| b.cmp(a)),
    }
}
