mod role_gate_tests;
