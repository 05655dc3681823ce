mod property_lines;
