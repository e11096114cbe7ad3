//! Builds small, hand-laid-out data files in memory so tests don't depend
//! on a real compiled signature database. Every record is written in
//! exactly the byte order its entity's `decode` expects; cross-region
//! references are written as placeholders and patched once every region's
//! final byte offset is known.
use devicedb::header::Header;

fn put_u8(buf: &mut Vec<u8>, v: u8) {
    buf.push(v);
}
fn put_u16(buf: &mut Vec<u8>, v: u16) {
    buf.extend_from_slice(&v.to_le_bytes());
}
fn put_u32(buf: &mut Vec<u8>, v: u32) {
    buf.extend_from_slice(&v.to_le_bytes());
}
fn put_i32(buf: &mut Vec<u8>, v: i32) {
    buf.extend_from_slice(&v.to_le_bytes());
}
fn put_u64(buf: &mut Vec<u8>, v: u64) {
    buf.extend_from_slice(&v.to_le_bytes());
}
fn put_str(buf: &mut Vec<u8>, s: &str) {
    put_u16(buf, s.len() as u16);
    buf.extend_from_slice(s.as_bytes());
}
fn patch_u32(buf: &mut [u8], pos: usize, v: u32) {
    buf[pos..pos + 4].copy_from_slice(&v.to_le_bytes());
}
fn patch_u64(buf: &mut [u8], pos: usize, v: u64) {
    buf[pos..pos + 8].copy_from_slice(&v.to_le_bytes());
}

/// One component (Hardware), one boolean property (IsMobile), one value
/// (True), one profile carrying `profile_id`, and a two-node trie
/// ("M" -> "ozilla") whose signature resolves to that profile. Matching
/// "Mozilla..." against the returned bytes takes the Exact path; anything
/// not starting with 'M' falls through to `Strategy::None`.
pub fn build_minimal_dataset_bytes(profile_id: u32) -> Vec<u8> {
    let mut strings = Vec::new();
    let str0_rel = strings.len() as u64;
    put_str(&mut strings, "devicedb fixture");
    let str1_rel = strings.len() as u64;
    put_str(&mut strings, "Hardware");
    let str2_rel = strings.len() as u64;
    put_str(&mut strings, "IsMobile");
    let str3_rel = strings.len() as u64;
    put_str(&mut strings, "True");

    let mut components = Vec::new();
    put_u8(&mut components, 0);
    let comp_name_pos = components.len();
    put_u32(&mut components, 0);
    let comp_default_profile_pos = components.len();
    put_u32(&mut components, 0);
    put_u16(&mut components, 0);

    let maps: Vec<u8> = Vec::new();

    let mut properties = Vec::new();
    let prop_name_pos = properties.len();
    put_u32(&mut properties, 0);
    put_u32(&mut properties, 0);
    put_u32(&mut properties, 0);
    put_u32(&mut properties, 0);
    put_i32(&mut properties, 0);
    put_u8(&mut properties, 0);
    put_u8(&mut properties, 0);
    put_u8(&mut properties, 0);
    put_u8(&mut properties, 1);
    put_u8(&mut properties, 3); // ValueType::Bool
    put_u32(&mut properties, 0);
    put_u8(&mut properties, 0);
    put_u16(&mut properties, 0);
    put_u32(&mut properties, 0);
    put_u32(&mut properties, 0);
    put_u32(&mut properties, 0);
    put_u32(&mut properties, 0);

    let mut values = Vec::new();
    let value_name_pos = values.len();
    put_u32(&mut values, 0);
    put_u32(&mut values, 0);
    put_u32(&mut values, 0);
    put_u32(&mut values, 0);

    let mut profiles = Vec::new();
    let profile0_rel = profiles.len() as u64;
    put_u8(&mut profiles, 0);
    put_u32(&mut profiles, profile_id);
    put_u32(&mut profiles, 1);
    put_u32(&mut profiles, 1);
    put_u32(&mut profiles, 0);
    put_u32(&mut profiles, 0);

    let mut nodes = Vec::new();
    let node_a_rel = nodes.len() as u64;
    put_u64(&mut nodes, u64::MAX); // no parent
    put_u16(&mut nodes, 0); // position
    put_u16(&mut nodes, 1); // child_count
    put_u16(&mut nodes, 0); // numeric_child_count
    put_u32(&mut nodes, 1); // ranked_signature_count
    put_u16(&mut nodes, 1); // characters_len
    put_u8(&mut nodes, b'o');
    let node_a_child_pos = nodes.len();
    put_u64(&mut nodes, 0);
    nodes.extend_from_slice(b"M");

    let node_b_rel = nodes.len() as u64;
    let node_b_parent_pos = nodes.len();
    put_u64(&mut nodes, 0);
    put_u16(&mut nodes, 1); // position
    put_u16(&mut nodes, 0); // child_count
    put_u16(&mut nodes, 0); // numeric_child_count
    put_u32(&mut nodes, 1); // ranked_signature_count
    put_u16(&mut nodes, 6); // characters_len
    nodes.extend_from_slice(b"ozilla");

    let mut signatures = Vec::new();
    put_u8(&mut signatures, 1); // profile_count
    put_u8(&mut signatures, 2); // node_count
    put_i32(&mut signatures, 0); // rank
    let sig_profile_pos = signatures.len();
    put_u64(&mut signatures, 0);
    let sig_node_a_pos = signatures.len();
    put_u64(&mut signatures, 0);
    let sig_node_b_pos = signatures.len();
    put_u64(&mut signatures, 0);

    let mut ranked = Vec::new();
    put_u32(&mut ranked, 0);

    let header_size = Header::ENCODED_SIZE as u64;
    let strings_offset = header_size;
    let components_offset = strings_offset + strings.len() as u64;
    let maps_offset = components_offset + components.len() as u64;
    let properties_offset = maps_offset + maps.len() as u64;
    let values_offset = properties_offset + properties.len() as u64;
    let profiles_offset = values_offset + values.len() as u64;
    let signatures_offset = profiles_offset + profiles.len() as u64;
    let ranked_offset = signatures_offset + signatures.len() as u64;
    let nodes_offset = ranked_offset + ranked.len() as u64;

    patch_u32(&mut components, comp_name_pos, (strings_offset + str1_rel) as u32);
    patch_u32(&mut components, comp_default_profile_pos, (profiles_offset + profile0_rel) as u32);
    patch_u32(&mut properties, prop_name_pos, (strings_offset + str2_rel) as u32);
    patch_u32(&mut values, value_name_pos, (strings_offset + str3_rel) as u32);

    let node_a_abs = nodes_offset + node_a_rel;
    let node_b_abs = nodes_offset + node_b_rel;
    patch_u64(&mut nodes, node_a_child_pos, node_b_abs);
    patch_u64(&mut nodes, node_b_parent_pos, node_a_abs);

    patch_u64(&mut signatures, sig_profile_pos, profiles_offset + profile0_rel);
    patch_u64(&mut signatures, sig_node_a_pos, node_a_abs);
    patch_u64(&mut signatures, sig_node_b_pos, node_b_abs);

    let copyright_offset = (strings_offset + str0_rel) as u32;

    let mut buf = Vec::new();
    buf.extend_from_slice(b"DVDB");
    put_u8(&mut buf, 2); // FormatVersion::V32
    put_i32(&mut buf, 0); // publish_date_epoch_days
    put_i32(&mut buf, 0); // next_update_epoch_days
    put_u32(&mut buf, copyright_offset);
    put_u16(&mut buf, 0); // age
    put_u16(&mut buf, 4); // min_user_agent_length
    put_u32(&mut buf, 4); // strings_count
    put_u32(&mut buf, 1); // components_count
    put_u32(&mut buf, 0); // maps_count
    put_u32(&mut buf, 1); // properties_count
    put_u32(&mut buf, 1); // values_count
    put_u32(&mut buf, 1); // profiles_count
    put_u32(&mut buf, 1); // signatures_count
    put_u32(&mut buf, 1); // ranked_signature_indexes_count
    put_u32(&mut buf, 2); // nodes_count
    put_u64(&mut buf, strings_offset);
    put_u64(&mut buf, components_offset);
    put_u64(&mut buf, maps_offset);
    put_u64(&mut buf, properties_offset);
    put_u64(&mut buf, values_offset);
    put_u64(&mut buf, profiles_offset);
    put_u64(&mut buf, signatures_offset);
    put_u64(&mut buf, ranked_offset);
    put_u64(&mut buf, nodes_offset);
    assert_eq!(buf.len(), header_size as usize);

    buf.extend_from_slice(&strings);
    buf.extend_from_slice(&components);
    buf.extend_from_slice(&maps);
    buf.extend_from_slice(&properties);
    buf.extend_from_slice(&values);
    buf.extend_from_slice(&profiles);
    buf.extend_from_slice(&signatures);
    buf.extend_from_slice(&ranked);
    buf.extend_from_slice(&nodes);
    buf
}

/// Same component/property/value/profile scaffolding as
/// `build_minimal_dataset_bytes`, but with a root node ("Chrome/") carrying
/// one numeric-child range instead of a literal continuation. Matching
/// "Chrome/105 ..." walks the literal trie one node deep, then the numeric
/// trie two nodes deep (digits "105" fall in the declared range), and only
/// the two-node path has a signature — so the match resolves on the
/// `Strategy::Numeric` path (§4.G step 3).
pub fn build_numeric_dataset_bytes(profile_id: u32) -> Vec<u8> {
    let mut strings = Vec::new();
    let str0_rel = strings.len() as u64;
    put_str(&mut strings, "devicedb fixture");
    let str1_rel = strings.len() as u64;
    put_str(&mut strings, "Hardware");
    let str2_rel = strings.len() as u64;
    put_str(&mut strings, "IsMobile");
    let str3_rel = strings.len() as u64;
    put_str(&mut strings, "True");

    let mut components = Vec::new();
    put_u8(&mut components, 0);
    let comp_name_pos = components.len();
    put_u32(&mut components, 0);
    let comp_default_profile_pos = components.len();
    put_u32(&mut components, 0);
    put_u16(&mut components, 0);

    let maps: Vec<u8> = Vec::new();

    let mut properties = Vec::new();
    let prop_name_pos = properties.len();
    put_u32(&mut properties, 0);
    put_u32(&mut properties, 0);
    put_u32(&mut properties, 0);
    put_u32(&mut properties, 0);
    put_i32(&mut properties, 0);
    put_u8(&mut properties, 0);
    put_u8(&mut properties, 0);
    put_u8(&mut properties, 0);
    put_u8(&mut properties, 1);
    put_u8(&mut properties, 3);
    put_u32(&mut properties, 0);
    put_u8(&mut properties, 0);
    put_u16(&mut properties, 0);
    put_u32(&mut properties, 0);
    put_u32(&mut properties, 0);
    put_u32(&mut properties, 0);
    put_u32(&mut properties, 0);

    let mut values = Vec::new();
    let value_name_pos = values.len();
    put_u32(&mut values, 0);
    put_u32(&mut values, 0);
    put_u32(&mut values, 0);
    put_u32(&mut values, 0);

    let mut profiles = Vec::new();
    let profile0_rel = profiles.len() as u64;
    put_u8(&mut profiles, 0);
    put_u32(&mut profiles, profile_id);
    put_u32(&mut profiles, 1);
    put_u32(&mut profiles, 1);
    put_u32(&mut profiles, 0);
    put_u32(&mut profiles, 0);

    // node1: "Chrome/" at position 0, one numeric-child range [1, 999].
    let mut nodes = Vec::new();
    let node1_rel = nodes.len() as u64;
    put_u64(&mut nodes, u64::MAX); // no parent
    put_u16(&mut nodes, 0); // position
    put_u16(&mut nodes, 0); // child_count
    put_u16(&mut nodes, 1); // numeric_child_count
    put_u32(&mut nodes, 1); // ranked_signature_count
    put_u16(&mut nodes, 7); // characters_len
    put_u16(&mut nodes, 1); // numeric low
    put_u16(&mut nodes, 999); // numeric high
    let node1_numeric_child_pos = nodes.len();
    put_u64(&mut nodes, 0); // patched: node_num offset
    nodes.extend_from_slice(b"Chrome/");

    // node_num: reached only through the numeric range, no characters of
    // its own (the digit run it captures is variable-length).
    let node_num_rel = nodes.len() as u64;
    put_u64(&mut nodes, 0); // patched: parent = node1
    put_u16(&mut nodes, 7); // position
    put_u16(&mut nodes, 0); // child_count
    put_u16(&mut nodes, 0); // numeric_child_count
    put_u32(&mut nodes, 1); // ranked_signature_count
    put_u16(&mut nodes, 0); // characters_len

    let mut signatures = Vec::new();
    put_u8(&mut signatures, 1); // profile_count
    put_u8(&mut signatures, 2); // node_count
    put_i32(&mut signatures, 0); // rank
    let sig_profile_pos = signatures.len();
    put_u64(&mut signatures, 0);
    let sig_node1_pos = signatures.len();
    put_u64(&mut signatures, 0);
    let sig_node_num_pos = signatures.len();
    put_u64(&mut signatures, 0);

    let mut ranked = Vec::new();
    put_u32(&mut ranked, 0);

    let header_size = Header::ENCODED_SIZE as u64;
    let strings_offset = header_size;
    let components_offset = strings_offset + strings.len() as u64;
    let maps_offset = components_offset + components.len() as u64;
    let properties_offset = maps_offset + maps.len() as u64;
    let values_offset = properties_offset + properties.len() as u64;
    let profiles_offset = values_offset + values.len() as u64;
    let signatures_offset = profiles_offset + profiles.len() as u64;
    let ranked_offset = signatures_offset + signatures.len() as u64;
    let nodes_offset = ranked_offset + ranked.len() as u64;

    patch_u32(&mut components, comp_name_pos, (strings_offset + str1_rel) as u32);
    patch_u32(&mut components, comp_default_profile_pos, (profiles_offset + profile0_rel) as u32);
    patch_u32(&mut properties, prop_name_pos, (strings_offset + str2_rel) as u32);
    patch_u32(&mut values, value_name_pos, (strings_offset + str3_rel) as u32);

    let node1_abs = nodes_offset + node1_rel;
    let node_num_abs = nodes_offset + node_num_rel;
    patch_u64(&mut nodes, node1_numeric_child_pos, node_num_abs);
    // node_num's parent field is the first 8 bytes of its own record.
    patch_u64(&mut nodes, node_num_rel as usize, node1_abs);

    patch_u64(&mut signatures, sig_profile_pos, profiles_offset + profile0_rel);
    patch_u64(&mut signatures, sig_node1_pos, node1_abs);
    patch_u64(&mut signatures, sig_node_num_pos, node_num_abs);

    let copyright_offset = (strings_offset + str0_rel) as u32;

    let mut buf = Vec::new();
    buf.extend_from_slice(b"DVDB");
    put_u8(&mut buf, 2);
    put_i32(&mut buf, 0);
    put_i32(&mut buf, 0);
    put_u32(&mut buf, copyright_offset);
    put_u16(&mut buf, 0);
    put_u16(&mut buf, 4);
    put_u32(&mut buf, 4);
    put_u32(&mut buf, 1);
    put_u32(&mut buf, 0);
    put_u32(&mut buf, 1);
    put_u32(&mut buf, 1);
    put_u32(&mut buf, 1);
    put_u32(&mut buf, 1);
    put_u32(&mut buf, 1);
    put_u32(&mut buf, 2); // nodes_count
    put_u64(&mut buf, strings_offset);
    put_u64(&mut buf, components_offset);
    put_u64(&mut buf, maps_offset);
    put_u64(&mut buf, properties_offset);
    put_u64(&mut buf, values_offset);
    put_u64(&mut buf, profiles_offset);
    put_u64(&mut buf, signatures_offset);
    put_u64(&mut buf, ranked_offset);
    put_u64(&mut buf, nodes_offset);
    assert_eq!(buf.len(), header_size as usize);

    buf.extend_from_slice(&strings);
    buf.extend_from_slice(&components);
    buf.extend_from_slice(&maps);
    buf.extend_from_slice(&properties);
    buf.extend_from_slice(&values);
    buf.extend_from_slice(&profiles);
    buf.extend_from_slice(&signatures);
    buf.extend_from_slice(&ranked);
    buf.extend_from_slice(&nodes);
    buf
}

/// One root node ("Foo/", no children) plus a second, unreachable node,
/// both referenced together by a single two-node signature. Matching
/// "Foo/..." walks to exactly the first node — no signature has a
/// single-node offset list, so there's no exact match, but the signature
/// does share that one node, so the match resolves on the
/// `Strategy::Nearest` path (§4.G step 4).
pub fn build_nearest_dataset_bytes(profile_id: u32) -> Vec<u8> {
    let mut strings = Vec::new();
    let str0_rel = strings.len() as u64;
    put_str(&mut strings, "devicedb fixture");
    let str1_rel = strings.len() as u64;
    put_str(&mut strings, "Hardware");
    let str2_rel = strings.len() as u64;
    put_str(&mut strings, "IsMobile");
    let str3_rel = strings.len() as u64;
    put_str(&mut strings, "True");

    let mut components = Vec::new();
    put_u8(&mut components, 0);
    let comp_name_pos = components.len();
    put_u32(&mut components, 0);
    let comp_default_profile_pos = components.len();
    put_u32(&mut components, 0);
    put_u16(&mut components, 0);

    let maps: Vec<u8> = Vec::new();

    let mut properties = Vec::new();
    let prop_name_pos = properties.len();
    put_u32(&mut properties, 0);
    put_u32(&mut properties, 0);
    put_u32(&mut properties, 0);
    put_u32(&mut properties, 0);
    put_i32(&mut properties, 0);
    put_u8(&mut properties, 0);
    put_u8(&mut properties, 0);
    put_u8(&mut properties, 0);
    put_u8(&mut properties, 1);
    put_u8(&mut properties, 3);
    put_u32(&mut properties, 0);
    put_u8(&mut properties, 0);
    put_u16(&mut properties, 0);
    put_u32(&mut properties, 0);
    put_u32(&mut properties, 0);
    put_u32(&mut properties, 0);
    put_u32(&mut properties, 0);

    let mut values = Vec::new();
    let value_name_pos = values.len();
    put_u32(&mut values, 0);
    put_u32(&mut values, 0);
    put_u32(&mut values, 0);
    put_u32(&mut values, 0);

    let mut profiles = Vec::new();
    let profile0_rel = profiles.len() as u64;
    put_u8(&mut profiles, 0);
    put_u32(&mut profiles, profile_id);
    put_u32(&mut profiles, 1);
    put_u32(&mut profiles, 1);
    put_u32(&mut profiles, 0);
    put_u32(&mut profiles, 0);

    // node1: "Foo/" at position 0, reachable from the root set.
    let mut nodes = Vec::new();
    let node1_rel = nodes.len() as u64;
    put_u64(&mut nodes, u64::MAX);
    put_u16(&mut nodes, 0);
    put_u16(&mut nodes, 0);
    put_u16(&mut nodes, 0);
    put_u32(&mut nodes, 1);
    put_u16(&mut nodes, 4);
    nodes.extend_from_slice(b"Foo/");

    // node2: a second root with an unrelated leading byte, never reached
    // by matching "Foo/..." — present only so the signature below spans
    // two nodes and an exact single-node lookup can't succeed.
    let node2_rel = nodes.len() as u64;
    put_u64(&mut nodes, u64::MAX);
    put_u16(&mut nodes, 0);
    put_u16(&mut nodes, 0);
    put_u16(&mut nodes, 0);
    put_u32(&mut nodes, 1);
    put_u16(&mut nodes, 1);
    nodes.extend_from_slice(b"Z");

    let mut signatures = Vec::new();
    put_u8(&mut signatures, 1);
    put_u8(&mut signatures, 2);
    put_i32(&mut signatures, 0);
    let sig_profile_pos = signatures.len();
    put_u64(&mut signatures, 0);
    let sig_node1_pos = signatures.len();
    put_u64(&mut signatures, 0);
    let sig_node2_pos = signatures.len();
    put_u64(&mut signatures, 0);

    let mut ranked = Vec::new();
    put_u32(&mut ranked, 0);

    let header_size = Header::ENCODED_SIZE as u64;
    let strings_offset = header_size;
    let components_offset = strings_offset + strings.len() as u64;
    let maps_offset = components_offset + components.len() as u64;
    let properties_offset = maps_offset + maps.len() as u64;
    let values_offset = properties_offset + properties.len() as u64;
    let profiles_offset = values_offset + values.len() as u64;
    let signatures_offset = profiles_offset + profiles.len() as u64;
    let ranked_offset = signatures_offset + signatures.len() as u64;
    let nodes_offset = ranked_offset + ranked.len() as u64;

    patch_u32(&mut components, comp_name_pos, (strings_offset + str1_rel) as u32);
    patch_u32(&mut components, comp_default_profile_pos, (profiles_offset + profile0_rel) as u32);
    patch_u32(&mut properties, prop_name_pos, (strings_offset + str2_rel) as u32);
    patch_u32(&mut values, value_name_pos, (strings_offset + str3_rel) as u32);

    let node1_abs = nodes_offset + node1_rel;
    let node2_abs = nodes_offset + node2_rel;

    patch_u64(&mut signatures, sig_profile_pos, profiles_offset + profile0_rel);
    patch_u64(&mut signatures, sig_node1_pos, node1_abs);
    patch_u64(&mut signatures, sig_node2_pos, node2_abs);

    let copyright_offset = (strings_offset + str0_rel) as u32;

    let mut buf = Vec::new();
    buf.extend_from_slice(b"DVDB");
    put_u8(&mut buf, 2);
    put_i32(&mut buf, 0);
    put_i32(&mut buf, 0);
    put_u32(&mut buf, copyright_offset);
    put_u16(&mut buf, 0);
    put_u16(&mut buf, 4);
    put_u32(&mut buf, 4);
    put_u32(&mut buf, 1);
    put_u32(&mut buf, 0);
    put_u32(&mut buf, 1);
    put_u32(&mut buf, 1);
    put_u32(&mut buf, 1);
    put_u32(&mut buf, 1);
    put_u32(&mut buf, 1);
    put_u32(&mut buf, 2);
    put_u64(&mut buf, strings_offset);
    put_u64(&mut buf, components_offset);
    put_u64(&mut buf, maps_offset);
    put_u64(&mut buf, properties_offset);
    put_u64(&mut buf, values_offset);
    put_u64(&mut buf, profiles_offset);
    put_u64(&mut buf, signatures_offset);
    put_u64(&mut buf, ranked_offset);
    put_u64(&mut buf, nodes_offset);
    assert_eq!(buf.len(), header_size as usize);

    buf.extend_from_slice(&strings);
    buf.extend_from_slice(&components);
    buf.extend_from_slice(&maps);
    buf.extend_from_slice(&properties);
    buf.extend_from_slice(&values);
    buf.extend_from_slice(&profiles);
    buf.extend_from_slice(&signatures);
    buf.extend_from_slice(&ranked);
    buf.extend_from_slice(&nodes);
    buf
}

/// A root node ("Bar/", no children) plus an unrelated node that only a
/// signature references (never reachable by walking the trie). Matching
/// "Bar/..." finds the first node but no signature shares it, so the match
/// falls all the way to an edit-distance scan over every signature —
/// `Strategy::Closest` (§4.G step 5).
pub fn build_closest_dataset_bytes(profile_id: u32) -> Vec<u8> {
    let mut strings = Vec::new();
    let str0_rel = strings.len() as u64;
    put_str(&mut strings, "devicedb fixture");
    let str1_rel = strings.len() as u64;
    put_str(&mut strings, "Hardware");
    let str2_rel = strings.len() as u64;
    put_str(&mut strings, "IsMobile");
    let str3_rel = strings.len() as u64;
    put_str(&mut strings, "True");

    let mut components = Vec::new();
    put_u8(&mut components, 0);
    let comp_name_pos = components.len();
    put_u32(&mut components, 0);
    let comp_default_profile_pos = components.len();
    put_u32(&mut components, 0);
    put_u16(&mut components, 0);

    let maps: Vec<u8> = Vec::new();

    let mut properties = Vec::new();
    let prop_name_pos = properties.len();
    put_u32(&mut properties, 0);
    put_u32(&mut properties, 0);
    put_u32(&mut properties, 0);
    put_u32(&mut properties, 0);
    put_i32(&mut properties, 0);
    put_u8(&mut properties, 0);
    put_u8(&mut properties, 0);
    put_u8(&mut properties, 0);
    put_u8(&mut properties, 1);
    put_u8(&mut properties, 3);
    put_u32(&mut properties, 0);
    put_u8(&mut properties, 0);
    put_u16(&mut properties, 0);
    put_u32(&mut properties, 0);
    put_u32(&mut properties, 0);
    put_u32(&mut properties, 0);
    put_u32(&mut properties, 0);

    let mut values = Vec::new();
    let value_name_pos = values.len();
    put_u32(&mut values, 0);
    put_u32(&mut values, 0);
    put_u32(&mut values, 0);
    put_u32(&mut values, 0);

    let mut profiles = Vec::new();
    let profile0_rel = profiles.len() as u64;
    put_u8(&mut profiles, 0);
    put_u32(&mut profiles, profile_id);
    put_u32(&mut profiles, 1);
    put_u32(&mut profiles, 1);
    put_u32(&mut profiles, 0);
    put_u32(&mut profiles, 0);

    // node_walk: "Bar/" at position 0, what matching actually reaches.
    let mut nodes = Vec::new();
    put_u64(&mut nodes, u64::MAX);
    put_u16(&mut nodes, 0);
    put_u16(&mut nodes, 0);
    put_u16(&mut nodes, 0);
    put_u32(&mut nodes, 1);
    put_u16(&mut nodes, 4);
    nodes.extend_from_slice(b"Bar/");

    // node_sig_only: a different root, referenced only by the signature
    // below, so it scores the Closest edit distance against "Qux/".
    let node_sig_only_rel = nodes.len() as u64;
    put_u64(&mut nodes, u64::MAX);
    put_u16(&mut nodes, 0);
    put_u16(&mut nodes, 0);
    put_u16(&mut nodes, 0);
    put_u32(&mut nodes, 1);
    put_u16(&mut nodes, 4);
    nodes.extend_from_slice(b"Qux/");

    let mut signatures = Vec::new();
    put_u8(&mut signatures, 1);
    put_u8(&mut signatures, 1);
    put_i32(&mut signatures, 0);
    let sig_profile_pos = signatures.len();
    put_u64(&mut signatures, 0);
    let sig_node_pos = signatures.len();
    put_u64(&mut signatures, 0);

    let mut ranked = Vec::new();
    put_u32(&mut ranked, 0);

    let header_size = Header::ENCODED_SIZE as u64;
    let strings_offset = header_size;
    let components_offset = strings_offset + strings.len() as u64;
    let maps_offset = components_offset + components.len() as u64;
    let properties_offset = maps_offset + maps.len() as u64;
    let values_offset = properties_offset + properties.len() as u64;
    let profiles_offset = values_offset + values.len() as u64;
    let signatures_offset = profiles_offset + profiles.len() as u64;
    let ranked_offset = signatures_offset + signatures.len() as u64;
    let nodes_offset = ranked_offset + ranked.len() as u64;

    patch_u32(&mut components, comp_name_pos, (strings_offset + str1_rel) as u32);
    patch_u32(&mut components, comp_default_profile_pos, (profiles_offset + profile0_rel) as u32);
    patch_u32(&mut properties, prop_name_pos, (strings_offset + str2_rel) as u32);
    patch_u32(&mut values, value_name_pos, (strings_offset + str3_rel) as u32);

    let node_sig_only_abs = nodes_offset + node_sig_only_rel;

    patch_u64(&mut signatures, sig_profile_pos, profiles_offset + profile0_rel);
    patch_u64(&mut signatures, sig_node_pos, node_sig_only_abs);

    let copyright_offset = (strings_offset + str0_rel) as u32;

    let mut buf = Vec::new();
    buf.extend_from_slice(b"DVDB");
    put_u8(&mut buf, 2);
    put_i32(&mut buf, 0);
    put_i32(&mut buf, 0);
    put_u32(&mut buf, copyright_offset);
    put_u16(&mut buf, 0);
    put_u16(&mut buf, 4);
    put_u32(&mut buf, 4);
    put_u32(&mut buf, 1);
    put_u32(&mut buf, 0);
    put_u32(&mut buf, 1);
    put_u32(&mut buf, 1);
    put_u32(&mut buf, 1);
    put_u32(&mut buf, 1);
    put_u32(&mut buf, 1);
    put_u32(&mut buf, 2);
    put_u64(&mut buf, strings_offset);
    put_u64(&mut buf, components_offset);
    put_u64(&mut buf, maps_offset);
    put_u64(&mut buf, properties_offset);
    put_u64(&mut buf, values_offset);
    put_u64(&mut buf, profiles_offset);
    put_u64(&mut buf, signatures_offset);
    put_u64(&mut buf, ranked_offset);
    put_u64(&mut buf, nodes_offset);
    assert_eq!(buf.len(), header_size as usize);

    buf.extend_from_slice(&strings);
    buf.extend_from_slice(&components);
    buf.extend_from_slice(&maps);
    buf.extend_from_slice(&properties);
    buf.extend_from_slice(&values);
    buf.extend_from_slice(&profiles);
    buf.extend_from_slice(&signatures);
    buf.extend_from_slice(&ranked);
    buf.extend_from_slice(&nodes);
    buf
}
