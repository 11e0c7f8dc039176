//! Component storage
//!
//! Components form a closed set. Each entity holds at most one component per
//! [`ComponentKind`], keyed in its component table. [`ComponentSlot`] maps
//! a concrete component type onto its slot so entities can be queried by
//! type (`entity.get::<CollisionComponent>()`).

use super::components::{
    AudioComponent, CollisionComponent, ColourBlockComponent, FourWayMovementComponent,
    KeyboardComponent, MouseComponent, OverlapComponent, SpriteComponent, TextLabelComponent,
    TweenComponent,
};

/// Discriminant of a [`Component`], used as the component table key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ComponentKind {
    /// Solid collision box
    Collision,
    /// Action-driven four-way movement
    FourWayMovement,
    /// Action pressed/released callbacks
    Keyboard,
    /// Click callback
    Mouse,
    /// Non-blocking overlap box
    Overlap,
    /// Image or spritesheet frame
    Sprite,
    /// Rendered text
    TextLabel,
    /// Solid colour rectangle
    ColourBlock,
    /// Sound playback
    Audio,
    /// Position tween
    Tween,
}

/// Every component an entity can carry
#[derive(Clone, Debug)]
#[allow(missing_docs)]
pub enum Component {
    Collision(CollisionComponent),
    FourWayMovement(FourWayMovementComponent),
    Keyboard(KeyboardComponent),
    Mouse(MouseComponent),
    Overlap(OverlapComponent),
    Sprite(SpriteComponent),
    TextLabel(TextLabelComponent),
    ColourBlock(ColourBlockComponent),
    Audio(AudioComponent),
    Tween(TweenComponent),
}

impl Component {
    /// The slot this component occupies
    pub const fn kind(&self) -> ComponentKind {
        match self {
            Self::Collision(_) => ComponentKind::Collision,
            Self::FourWayMovement(_) => ComponentKind::FourWayMovement,
            Self::Keyboard(_) => ComponentKind::Keyboard,
            Self::Mouse(_) => ComponentKind::Mouse,
            Self::Overlap(_) => ComponentKind::Overlap,
            Self::Sprite(_) => ComponentKind::Sprite,
            Self::TextLabel(_) => ComponentKind::TextLabel,
            Self::ColourBlock(_) => ComponentKind::ColourBlock,
            Self::Audio(_) => ComponentKind::Audio,
            Self::Tween(_) => ComponentKind::Tween,
        }
    }
}

/// Typed access to one slot of the component table
pub trait ComponentSlot: Sized + 'static {
    /// The slot this type occupies
    const KIND: ComponentKind;

    /// Wrap into the table representation
    fn into_component(self) -> Component;

    /// Borrow out of the table representation
    fn from_ref(component: &Component) -> Option<&Self>;

    /// Mutably borrow out of the table representation
    fn from_mut(component: &mut Component) -> Option<&mut Self>;

    /// Take out of the table representation
    fn from_owned(component: Component) -> Option<Self>;
}

macro_rules! component_slot {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl ComponentSlot for $ty {
                const KIND: ComponentKind = ComponentKind::$variant;

                fn into_component(self) -> Component {
                    Component::$variant(self)
                }

                fn from_ref(component: &Component) -> Option<&Self> {
                    match component {
                        Component::$variant(inner) => Some(inner),
                        _ => None,
                    }
                }

                fn from_mut(component: &mut Component) -> Option<&mut Self> {
                    match component {
                        Component::$variant(inner) => Some(inner),
                        _ => None,
                    }
                }

                fn from_owned(component: Component) -> Option<Self> {
                    match component {
                        Component::$variant(inner) => Some(inner),
                        _ => None,
                    }
                }
            }

            impl From<$ty> for Component {
                fn from(component: $ty) -> Self {
                    Component::$variant(component)
                }
            }
        )*
    };
}

component_slot! {
    CollisionComponent => Collision,
    FourWayMovementComponent => FourWayMovement,
    KeyboardComponent => Keyboard,
    MouseComponent => Mouse,
    OverlapComponent => Overlap,
    SpriteComponent => Sprite,
    TextLabelComponent => TextLabel,
    ColourBlockComponent => ColourBlock,
    AudioComponent => Audio,
    TweenComponent => Tween,
}
