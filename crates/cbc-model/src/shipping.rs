//! # Shipping Information
//!
//! A shipment goes either to a home address or to a PO box. A PO box needs a
//! contact number, home or mobile or both; a home address needs none.
//!
//! The loose [`ShippingForm`] holds four optional fields and needs
//! [`is_valid_shipping_info`] to say which combinations make sense. The
//! strict [`ShippingInfo`] keeps `name` outside and moves the branch into
//! [`PickupInfo`]: the outer "or" becomes an enum, the "at least one phone"
//! becomes [`AtLeastOne`].
//!
//! ```
//! use cbc_model::shipping::{PickupInfo, ShippingForm, ShippingInfo};
//!
//! let form: ShippingForm = serde_json::from_value(serde_json::json!({
//!     "name": "Avril Mondragon",
//!     "homePhone": "555-4444",
//!     "poBox": "Enfield Tennis Academy"
//! }))
//! .unwrap();
//!
//! let info = ShippingInfo::try_from(form).unwrap();
//! assert!(matches!(info.pickup_info, PickupInfo::PoBox { .. }));
//! ```

use serde::{Deserialize, Serialize};

use cbc_core::{AtLeastOne, PhoneNumber};

use crate::error::ShapeError;

/// Shipping details with every field optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingForm {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub home_phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mobile_phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub home_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub po_box: Option<String>,
}

/// Legacy validator: a home address alone, or a PO box with a phone number.
pub fn is_valid_shipping_info(form: &ShippingForm) -> bool {
    let home = form.home_address.is_some();
    let po_box = form.po_box.is_some();
    let phone = form.home_phone.is_some() || form.mobile_phone.is_some();
    (home && !po_box) || (po_box && !home && phone)
}

/// Where the shipment is collected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "tag")]
pub enum PickupInfo {
    /// Delivered to the door.
    HomeAddress { address: String },
    /// Held at a PO box; the carrier calls one of the numbers.
    #[serde(rename = "POBox", rename_all = "camelCase")]
    PoBox {
        address: String,
        /// Home phone on the left, mobile on the right.
        phone_number: AtLeastOne<PhoneNumber, PhoneNumber>,
    },
}

impl PickupInfo {
    /// The street address or PO box.
    pub fn address(&self) -> &str {
        match self {
            Self::HomeAddress { address } | Self::PoBox { address, .. } => address,
        }
    }
}

/// Valid shipping details.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingInfo {
    /// Recipient name.
    pub name: String,
    /// Where and how the parcel is collected.
    pub pickup_info: PickupInfo,
}

impl TryFrom<ShippingForm> for ShippingInfo {
    type Error = ShapeError;

    /// Phone numbers on a home-address form are dropped; that branch has no
    /// place for them.
    fn try_from(form: ShippingForm) -> Result<Self, Self::Error> {
        let pickup_info = match (form.home_address, form.po_box) {
            (Some(_), Some(_)) => {
                return Err(ShapeError::MutuallyExclusive {
                    first: "homeAddress",
                    second: "poBox",
                })
            }
            (None, None) => return Err(ShapeError::MissingField("homeAddress or poBox")),
            (Some(address), None) => PickupInfo::HomeAddress { address },
            (None, Some(address)) => {
                let phones = AtLeastOne::from_options(form.home_phone, form.mobile_phone)
                    .ok_or(ShapeError::MissingField("homePhone or mobilePhone"))?;
                let phone_number = phones.map(PhoneNumber::new, PhoneNumber::new).transpose()?;
                PickupInfo::PoBox {
                    address,
                    phone_number,
                }
            }
        };
        Ok(Self {
            name: form.name,
            pickup_info,
        })
    }
}

impl From<&ShippingInfo> for ShippingForm {
    fn from(info: &ShippingInfo) -> Self {
        let mut form = ShippingForm {
            name: info.name.clone(),
            ..ShippingForm::default()
        };
        match &info.pickup_info {
            PickupInfo::HomeAddress { address } => form.home_address = Some(address.clone()),
            PickupInfo::PoBox {
                address,
                phone_number,
            } => {
                form.po_box = Some(address.clone());
                form.home_phone = phone_number.left().map(|p| p.as_str().to_string());
                form.mobile_phone = phone_number.right().map(|p| p.as_str().to_string());
            }
        }
        form
    }
}
