crate::reexport!(source);
crate::reexport!(relevance);
crate::reexport!(query_suggestion);
crate::reexport!(service);
crate::reexport!(store);
crate::reexport!(favorites);
crate::reexport!(pipeline);
crate::reexport!(pipeline_tests, test);

use crate::*;
use serde::{Deserialize, Serialize};
