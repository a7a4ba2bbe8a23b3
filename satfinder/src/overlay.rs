//! Visibility of the two modal overlays.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Overlay {
    Manual,
    Settings,
}

impl Overlay {
    /// Class tag carried by elements that toggle this overlay.
    pub fn tag(&self) -> &'static str {
        match self {
            Overlay::Manual => "manual",
            Overlay::Settings => "settings",
        }
    }

    /// Id of the overlay's outer container.
    pub fn container_id(&self) -> &'static str {
        match self {
            Overlay::Manual => "overlay-manual",
            Overlay::Settings => "overlay-settings",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "manual" => Some(Overlay::Manual),
            "settings" => Some(Overlay::Settings),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    #[default]
    Hidden,
    Active,
}

impl Visibility {
    fn flipped(self) -> Self {
        match self {
            Visibility::Hidden => Visibility::Active,
            Visibility::Active => Visibility::Hidden,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OverlayState {
    manual: Visibility,
    settings: Visibility,
}

impl OverlayState {
    pub fn visibility(&self, overlay: Overlay) -> Visibility {
        match overlay {
            Overlay::Manual => self.manual,
            Overlay::Settings => self.settings,
        }
    }

    pub fn is_active(&self, overlay: Overlay) -> bool {
        self.visibility(overlay) == Visibility::Active
    }

    fn slot(&mut self, overlay: Overlay) -> &mut Visibility {
        match overlay {
            Overlay::Manual => &mut self.manual,
            Overlay::Settings => &mut self.settings,
        }
    }

    pub fn toggle(&mut self, overlay: Overlay) {
        let slot = self.slot(overlay);
        *slot = slot.flipped();
    }

    pub fn close(&mut self, overlay: Overlay) {
        *self.slot(overlay) = Visibility::Hidden;
    }

    /// Click that bubbled up to an overlay container. Only a click whose
    /// target is the container itself toggles; clicks on the dialog inside
    /// are ignored. Returns whether the overlay toggled.
    pub fn container_clicked(&mut self, overlay: Overlay, target_id: &str) -> bool {
        if target_id != overlay.container_id() {
            return false;
        }
        self.toggle(overlay);
        true
    }

    /// Click on an element carrying toggle tags. Each tagged overlay toggles.
    pub fn toggle_tagged(&mut self, tags: &[Overlay]) {
        for overlay in [Overlay::Manual, Overlay::Settings] {
            if tags.contains(&overlay) {
                self.toggle(overlay);
            }
        }
    }
}
