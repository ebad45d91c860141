crate::reexport!(cursor);
crate::reexport!(range);
crate::reexport!(candidate);
crate::reexport!(suggestion);
crate::reexport!(resolver);
crate::reexport!(resolver_tests, test);
