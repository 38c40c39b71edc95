// niemgraph - NIEM schema and document to property graph conversion
//
// Copyright (c) 2025 niemgraph contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Shared test fixtures for the niemgraph converters.
//!
//! The crash-driver fixture models the schema used across the engine's
//! tests: `Person` (complex name content), `Vehicle`, and the `Drives`
//! association between them, in the three namespaces (`exch`, `nc`, `j`) a
//! small NIEM exchange typically spans.

#![deny(missing_docs)]

use niemgraph_mapping::{compile_with_options, CompileOptions, MappingSpec};

/// CMF for the crash-driver exchange: Person, Vehicle, the Drives
/// association, and an exchange root element.
pub const CRASH_DRIVER_CMF: &str = r#"<?xml version="1.0"?>
<Model xmlns="https://docs.oasis-open.org/niemopen/ns/specification/cmf/1.0/"
       xmlns:structures="https://docs.oasis-open.org/niemopen/ns/model/structures/6.0/">
  <Namespace structures:id="exch">
    <NamespaceURI>urn:example:crash-driver-exchange</NamespaceURI>
    <NamespacePrefixText>exch</NamespacePrefixText>
  </Namespace>
  <Namespace structures:id="nc">
    <NamespaceURI>urn:example:niem-core</NamespaceURI>
    <NamespacePrefixText>nc</NamespacePrefixText>
  </Namespace>
  <Namespace structures:id="j">
    <NamespaceURI>urn:example:justice</NamespaceURI>
    <NamespacePrefixText>j</NamespacePrefixText>
  </Namespace>
  <Class structures:id="exch.CrashReportType">
    <Name>CrashReportType</Name>
    <Namespace structures:ref="exch"/>
    <ChildPropertyAssociation>
      <ObjectProperty structures:ref="nc.Person"/>
      <MinOccursQuantity>0</MinOccursQuantity>
      <MaxOccursQuantity>unbounded</MaxOccursQuantity>
    </ChildPropertyAssociation>
    <ChildPropertyAssociation>
      <ObjectProperty structures:ref="nc.Vehicle"/>
      <MinOccursQuantity>0</MinOccursQuantity>
      <MaxOccursQuantity>unbounded</MaxOccursQuantity>
    </ChildPropertyAssociation>
    <ChildPropertyAssociation>
      <ObjectProperty structures:ref="j.Drives"/>
      <MinOccursQuantity>0</MinOccursQuantity>
      <MaxOccursQuantity>unbounded</MaxOccursQuantity>
    </ChildPropertyAssociation>
  </Class>
  <Class structures:id="nc.PersonType">
    <Name>PersonType</Name>
    <Namespace structures:ref="nc"/>
    <ChildPropertyAssociation>
      <ObjectProperty structures:ref="nc.PersonName"/>
    </ChildPropertyAssociation>
  </Class>
  <Class structures:id="nc.PersonNameType">
    <Name>PersonNameType</Name>
    <Namespace structures:ref="nc"/>
    <ChildPropertyAssociation>
      <DataProperty structures:ref="nc.PersonGivenName"/>
    </ChildPropertyAssociation>
    <ChildPropertyAssociation>
      <DataProperty structures:ref="nc.PersonSurName"/>
    </ChildPropertyAssociation>
  </Class>
  <Class structures:id="nc.VehicleType">
    <Name>VehicleType</Name>
    <Namespace structures:ref="nc"/>
    <ChildPropertyAssociation>
      <DataProperty structures:ref="nc.VehicleIdentification"/>
    </ChildPropertyAssociation>
  </Class>
  <Class structures:id="nc.AssociationType">
    <Name>AssociationType</Name>
    <Namespace structures:ref="nc"/>
  </Class>
  <Class structures:id="j.DrivesType">
    <Name>DrivesType</Name>
    <Namespace structures:ref="j"/>
    <SubClassOf structures:ref="nc.AssociationType"/>
    <ChildPropertyAssociation>
      <ObjectProperty structures:ref="nc.Person"/>
    </ChildPropertyAssociation>
    <ChildPropertyAssociation>
      <ObjectProperty structures:ref="nc.Vehicle"/>
    </ChildPropertyAssociation>
  </Class>
  <ObjectProperty structures:id="exch.CrashReport">
    <Name>CrashReport</Name>
    <Namespace structures:ref="exch"/>
    <Class structures:ref="exch.CrashReportType"/>
  </ObjectProperty>
  <ObjectProperty structures:id="nc.Person">
    <Name>Person</Name>
    <Namespace structures:ref="nc"/>
    <Class structures:ref="nc.PersonType"/>
  </ObjectProperty>
  <ObjectProperty structures:id="nc.PersonName">
    <Name>PersonName</Name>
    <Namespace structures:ref="nc"/>
    <Class structures:ref="nc.PersonNameType"/>
  </ObjectProperty>
  <ObjectProperty structures:id="nc.Vehicle">
    <Name>Vehicle</Name>
    <Namespace structures:ref="nc"/>
    <Class structures:ref="nc.VehicleType"/>
  </ObjectProperty>
  <ObjectProperty structures:id="j.Drives">
    <Name>Drives</Name>
    <Namespace structures:ref="j"/>
    <Class structures:ref="j.DrivesType"/>
  </ObjectProperty>
  <DataProperty structures:id="nc.PersonGivenName">
    <Name>PersonGivenName</Name>
    <Namespace structures:ref="nc"/>
    <Datatype structures:ref="xs.string"/>
  </DataProperty>
  <DataProperty structures:id="nc.PersonSurName">
    <Name>PersonSurName</Name>
    <Namespace structures:ref="nc"/>
    <Datatype structures:ref="xs.string"/>
  </DataProperty>
  <DataProperty structures:id="nc.VehicleIdentification">
    <Name>VehicleIdentification</Name>
    <Namespace structures:ref="nc"/>
    <Datatype structures:ref="xs.string"/>
  </DataProperty>
  <Datatype structures:id="xs.string">
    <Name>string</Name>
    <Namespace structures:ref="xs"/>
  </Datatype>
  <Namespace structures:id="xs">
    <NamespaceURI>http://www.w3.org/2001/XMLSchema</NamespaceURI>
    <NamespacePrefixText>xs</NamespacePrefixText>
  </Namespace>
</Model>"#;

/// The crash-driver document as NIEM XML: `Person P1` (Ann Lee),
/// `Vehicle V1`, and a `Drives` association pointing at both.
pub const CRASH_DRIVER_XML: &str = r#"<?xml version="1.0"?>
<exch:CrashReport xmlns:exch="urn:example:crash-driver-exchange"
                  xmlns:nc="urn:example:niem-core"
                  xmlns:j="urn:example:justice"
                  xmlns:structures="https://docs.oasis-open.org/niemopen/ns/model/structures/6.0/"
                  xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">
  <nc:Person structures:id="P1">
    <nc:PersonName>
      <nc:PersonGivenName>Ann</nc:PersonGivenName>
      <nc:PersonSurName>Lee</nc:PersonSurName>
    </nc:PersonName>
  </nc:Person>
  <nc:Vehicle structures:id="V1">
    <nc:VehicleIdentification>1FT7X2B60FEA12345</nc:VehicleIdentification>
  </nc:Vehicle>
  <j:Drives>
    <nc:Person structures:ref="P1" xsi:nil="true"/>
    <nc:Vehicle structures:ref="V1" xsi:nil="true"/>
  </j:Drives>
</exch:CrashReport>"#;

/// The same document as NIEM JSON, semantically equivalent to
/// [`CRASH_DRIVER_XML`].
pub const CRASH_DRIVER_JSON: &str = r#"{
  "@context": {
    "exch": "urn:example:crash-driver-exchange",
    "nc": "urn:example:niem-core",
    "j": "urn:example:justice"
  },
  "exch:CrashReport": {
    "nc:Person": {
      "@id": "P1",
      "nc:PersonName": {
        "nc:PersonGivenName": "Ann",
        "nc:PersonSurName": "Lee"
      }
    },
    "nc:Vehicle": {
      "@id": "V1",
      "nc:VehicleIdentification": "1FT7X2B60FEA12345"
    },
    "j:Drives": {
      "nc:Person": {"@ref": "P1"},
      "nc:Vehicle": {"@ref": "V1"}
    }
  }
}"#;

/// Compile the crash-driver CMF into a specification.
pub fn crash_driver_spec() -> MappingSpec {
    let model = niemgraph_cmf::parse_cmf(CRASH_DRIVER_CMF).expect("fixture CMF parses");
    let options = CompileOptions {
        schema_digest: Some(niemgraph_mapping::schema_digest(CRASH_DRIVER_CMF)),
        ..CompileOptions::default()
    };
    compile_with_options(&model, &options).expect("fixture CMF compiles")
}
