/*
 * Resources Module
 *
 * Ledger of the GPU-adjacent handles acquired during one mount: render
 * target, output node, camera, lights, geometry, materials, textures and
 * the resize listener. Every entry must be released exactly once when the
 * mount is torn down.
 */

use std::collections::BTreeMap;
use std::fmt;

use crate::error::{Result, SpheresError};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ResourceId(u64);

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResourceKind {
    RenderTarget,
    OutputNode,
    Camera,
    AmbientLight,
    DirectionalLight,
    Geometry,
    Material,
    Texture,
    ResizeListener,
}

#[derive(Clone, Debug)]
pub struct ResourceRecord {
    pub kind: ResourceKind,
    pub label: String,
    pub releases: u32,
}

impl ResourceRecord {
    pub fn is_live(&self) -> bool {
        self.releases == 0
    }
}

#[derive(Default, Debug)]
pub struct ResourceTracker {
    next_id: u64,
    records: BTreeMap<ResourceId, ResourceRecord>,
}

impl ResourceTracker {
    pub fn new() -> Self {
        Self::default()
    }

    // Record a new acquisition and hand out its id
    pub fn acquire(&mut self, kind: ResourceKind, label: impl Into<String>) -> ResourceId {
        self.next_id += 1;
        let id = ResourceId(self.next_id);
        self.records.insert(id, ResourceRecord {
            kind,
            label: label.into(),
            releases: 0,
        });
        id
    }

    // Mark a resource released. A second release is reported, never counted twice.
    pub fn release(&mut self, id: ResourceId) -> Result<()> {
        let record = self.records.get_mut(&id).ok_or(SpheresError::UnknownResource(id))?;
        if !record.is_live() {
            return Err(SpheresError::AlreadyReleased(id));
        }
        record.releases = 1;
        Ok(())
    }

    pub fn is_live(&self, id: ResourceId) -> bool {
        self.records.get(&id).map_or(false, ResourceRecord::is_live)
    }

    pub fn release_count(&self, id: ResourceId) -> Option<u32> {
        self.records.get(&id).map(|record| record.releases)
    }

    pub fn acquired_count(&self) -> usize {
        self.records.len()
    }

    pub fn count_of(&self, kind: ResourceKind) -> usize {
        self.records.values().filter(|record| record.kind == kind).count()
    }

    pub fn outstanding(&self) -> impl Iterator<Item = (ResourceId, &ResourceRecord)> {
        self.records
            .iter()
            .filter(|(_, record)| record.is_live())
            .map(|(&id, record)| (id, record))
    }

    pub fn iter(&self) -> impl Iterator<Item = (ResourceId, &ResourceRecord)> {
        self.records.iter().map(|(&id, record)| (id, record))
    }
}
