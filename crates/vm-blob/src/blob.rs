use vm_core::Rect;

use crate::{BlobError, Contour, Label};

/// One 8-connected foreground component.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Blob {
    pub label: Label,
    pub external: Contour,
    /// Hole boundaries, in discovery order. Empty when hole points were not
    /// requested; `hole_count` is maintained either way.
    pub internal: Vec<Contour>,
    pub hole_count: usize,
}

impl Blob {
    pub fn new(label: Label) -> Self {
        Self {
            label,
            ..Self::default()
        }
    }

    /// Number of holes, exposed under its historical name.
    pub fn euler_number(&self) -> usize {
        self.hole_count
    }

    pub fn bounding_rect(&self) -> Option<Rect> {
        self.external.bounding_rect()
    }
}

/// Blobs in label order: the blob with label `l` sits at index `l - 1`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlobRegistry {
    blobs: Vec<Blob>,
}

impl BlobRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_new(&mut self) -> Result<&mut Blob, BlobError> {
        let label = Label::try_from(self.blobs.len() + 1)
            .map_err(|_| BlobError::InvalidArgument("blob label space exhausted".to_string()))?;
        self.blobs
            .try_reserve(1)
            .map_err(|_| BlobError::oom("blob registry"))?;
        self.blobs.push(Blob::new(label));

        let idx = self.blobs.len() - 1;
        Ok(&mut self.blobs[idx])
    }

    /// Registers a new hole on blob `label`.
    ///
    /// With `store_points` the hole gets a fresh contour, returned for the
    /// tracer to fill; otherwise only the hole counter moves. `Ok(None)` is
    /// also returned when no blob carries `label`.
    pub fn begin_hole(
        &mut self,
        label: Label,
        store_points: bool,
    ) -> Result<Option<&mut Contour>, BlobError> {
        let Some(blob) = self.get_mut(label) else {
            return Ok(None);
        };

        if !store_points {
            blob.hole_count += 1;
            return Ok(None);
        }

        blob.internal
            .try_reserve(1)
            .map_err(|_| BlobError::oom("internal contour registry"))?;
        blob.internal.push(Contour::new());
        blob.hole_count += 1;
        Ok(blob.internal.last_mut())
    }

    pub fn get(&self, label: Label) -> Option<&Blob> {
        let idx = usize::try_from(label).ok()?.checked_sub(1)?;
        self.blobs.get(idx)
    }

    pub fn get_mut(&mut self, label: Label) -> Option<&mut Blob> {
        let idx = usize::try_from(label).ok()?.checked_sub(1)?;
        self.blobs.get_mut(idx)
    }

    pub fn contains(&self, label: Label) -> bool {
        self.get(label).is_some()
    }

    pub fn len(&self) -> usize {
        self.blobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blobs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Blob> {
        self.blobs.iter()
    }

    pub fn total_holes(&self) -> usize {
        self.blobs.iter().map(|b| b.hole_count).sum()
    }

    /// Frees every blob and contour. Idempotent.
    pub fn release(&mut self) {
        self.blobs = Vec::new();
    }
}

impl<'a> IntoIterator for &'a BlobRegistry {
    type Item = &'a Blob;
    type IntoIter = core::slice::Iter<'a, Blob>;

    fn into_iter(self) -> Self::IntoIter {
        self.blobs.iter()
    }
}

#[cfg(test)]
mod tests {
    use vm_core::Point2s;

    use super::BlobRegistry;

    #[test]
    fn labels_follow_insertion_order() {
        let mut reg = BlobRegistry::new();
        for expected in 1..=4u32 {
            let blob = reg.push_new().expect("push");
            assert_eq!(blob.label, expected);
        }

        let labels: Vec<u32> = reg.iter().map(|b| b.label).collect();
        assert_eq!(labels, vec![1, 2, 3, 4]);
        assert_eq!(reg.get(3).map(|b| b.label), Some(3));
        assert!(reg.get(0).is_none());
        assert!(reg.get(5).is_none());
    }

    #[test]
    fn holes_with_and_without_points() {
        let mut reg = BlobRegistry::new();
        reg.push_new().expect("push");

        let c = reg
            .begin_hole(1, true)
            .expect("no oom")
            .expect("contour requested");
        c.push(Point2s::new(1, 1)).expect("push");

        assert!(reg.begin_hole(1, false).expect("no oom").is_none());

        let blob = reg.get(1).expect("blob 1");
        assert_eq!(blob.hole_count, 2);
        assert_eq!(blob.euler_number(), 2);
        assert_eq!(blob.internal.len(), 1);
        assert_eq!(blob.internal[0].points(), &[Point2s::new(1, 1)]);
        assert_eq!(reg.total_holes(), 2);
    }

    #[test]
    fn hole_on_unknown_label_is_ignored() {
        let mut reg = BlobRegistry::new();
        assert!(reg.begin_hole(7, true).expect("no oom").is_none());
        assert!(reg.is_empty());
    }

    #[test]
    fn release_is_idempotent() {
        let mut reg = BlobRegistry::new();
        reg.release();
        assert!(reg.is_empty());

        reg.push_new().expect("push");
        reg.push_new().expect("push");
        reg.release();
        reg.release();
        assert_eq!(reg.len(), 0);
    }
}
