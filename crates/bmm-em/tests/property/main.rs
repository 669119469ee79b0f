mod em_properties;
