crate::reexport!(column);
crate::reexport!(table);
crate::reexport!(snapshot);
crate::reexport!(service);
crate::reexport!(registry);

use crate::*;
use serde::{Deserialize, Serialize};
