use crate::domain::model::{
    Category, PropertyType, RoomLayout, BEDROOM_SLOTS, LIVING_ROOM_SLOTS,
};
use serde::{Deserialize, Serialize};

/// A furniture checkbox and its size dropdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlotSelection {
    pub category: Category,
    #[serde(default)]
    pub included: bool,
    #[serde(default)]
    pub variant: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RoomSelection {
    #[serde(default)]
    pub slots: Vec<SlotSelection>,
}

impl RoomSelection {
    pub fn slot(&self, category: Category) -> Option<&SlotSelection> {
        self.slots.iter().find(|s| s.category == category)
    }

    pub fn slot_mut(&mut self, category: Category) -> &mut SlotSelection {
        if let Some(index) = self.slots.iter().position(|s| s.category == category) {
            return &mut self.slots[index];
        }
        self.slots.push(SlotSelection {
            category,
            included: false,
            variant: None,
        });
        let last = self.slots.len() - 1;
        &mut self.slots[last]
    }
}

/// Either a named preset or a length in cm typed by the user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KitchenSize {
    Standard(String),
    Custom(f64),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KitchenSelection {
    #[serde(default)]
    pub size: Option<KitchenSize>,
    #[serde(default)]
    pub kitchen_type: Option<String>,
}

/// Read-only snapshot of the form state at computation time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Selections {
    #[serde(default)]
    pub property_type: Option<PropertyType>,
    #[serde(default)]
    pub bedrooms: Vec<RoomSelection>,
    #[serde(default)]
    pub living_room: RoomSelection,
    #[serde(default)]
    pub kitchens: Vec<KitchenSelection>,
}

impl Selections {
    pub fn layout(&self) -> RoomLayout {
        RoomLayout {
            bedrooms: self.bedrooms.len(),
            kitchens: self.kitchens.len(),
        }
    }

    /// Grows or shrinks the room lists; surviving rooms keep their selections.
    pub fn resize(&mut self, layout: RoomLayout) {
        self.bedrooms.resize_with(layout.bedrooms, RoomSelection::default);
        self.kitchens.resize_with(layout.kitchens, KitchenSelection::default);
    }

    pub fn room(&self, room: RoomRef) -> Option<&RoomSelection> {
        match room {
            RoomRef::Bedroom(number) => number
                .checked_sub(1)
                .and_then(|index| self.bedrooms.get(index)),
            RoomRef::LivingRoom => Some(&self.living_room),
        }
    }

    pub fn room_mut(&mut self, room: RoomRef) -> Option<&mut RoomSelection> {
        match room {
            RoomRef::Bedroom(number) => number
                .checked_sub(1)
                .and_then(|index| self.bedrooms.get_mut(index)),
            RoomRef::LivingRoom => Some(&mut self.living_room),
        }
    }

    pub fn kitchen_mut(&mut self, number: usize) -> Option<&mut KitchenSelection> {
        number
            .checked_sub(1)
            .and_then(|index| self.kitchens.get_mut(index))
    }
}

/// A furniture-bearing room, numbered from 1 for bedrooms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RoomRef {
    Bedroom(usize),
    LivingRoom,
}

impl RoomRef {
    pub fn label(&self) -> String {
        match self {
            Self::Bedroom(number) => format!("Bedroom {}", number),
            Self::LivingRoom => "Living Room".to_string(),
        }
    }

    /// Slot types the room offers, in display order.
    pub fn slots(&self) -> &'static [Category] {
        match self {
            Self::Bedroom(_) => &BEDROOM_SLOTS,
            Self::LivingRoom => &LIVING_ROOM_SLOTS,
        }
    }
}

/// A single user input event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "change", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum SelectionChange {
    SetPropertyType {
        property_type: Option<PropertyType>,
    },
    SetRoomCounts {
        bedrooms: usize,
        kitchens: usize,
    },
    ToggleSlot {
        room: RoomRef,
        category: Category,
        included: bool,
    },
    ChooseVariant {
        room: RoomRef,
        category: Category,
        variant: Option<String>,
    },
    ChooseKitchenSize {
        kitchen: usize,
        size: Option<KitchenSize>,
    },
    ChooseKitchenType {
        kitchen: usize,
        kitchen_type: Option<String>,
    },
}
