crate::reexport!(surface);
crate::reexport!(command);
crate::reexport!(adapter);
crate::reexport!(adapter_tests, test);
