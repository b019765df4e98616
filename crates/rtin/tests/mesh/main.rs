mod mesh_properties;
mod worked_examples;
