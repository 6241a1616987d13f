/// Which sky the face is drawn for. The southern face is the northern one
/// mirrored: every computed angle changes sign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum Hemisphere {
    #[default]
    Northern,
    Southern,
}

impl Hemisphere {
    pub fn from_mirrored(mirrored: bool) -> Self {
        if mirrored {
            Hemisphere::Southern
        } else {
            Hemisphere::Northern
        }
    }

    pub fn is_mirrored(self) -> bool {
        self == Hemisphere::Southern
    }

    /// Multiplier applied to every angle of the date ring.
    pub fn sign(self) -> f32 {
        match self {
            Hemisphere::Northern => 1.0,
            Hemisphere::Southern => -1.0,
        }
    }
}

/// Rotation offset (degrees) plus mirroring, as set by the host before a draw.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Orientation {
    pub offset: f32,
    pub hemisphere: Hemisphere,
}

impl Orientation {
    pub fn new(offset: f32, mirrored: bool) -> Self {
        Self {
            offset,
            hemisphere: Hemisphere::from_mirrored(mirrored),
        }
    }

    pub fn is_mirrored(&self) -> bool {
        self.hemisphere.is_mirrored()
    }
}
