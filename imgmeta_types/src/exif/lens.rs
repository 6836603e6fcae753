//! Lens ID tables.
//!
//! Lens IDs aren't unique! Third-party lenses often reuse the ID of a
//! first-party lens, so each table may list the same ID more than once.
//! Printing narrows the candidates down where it can.

/// Canon lens types, from `Exif.CanonCs.LensType`.
pub static CANON_LENS: &[(i64, &str)] = &[
    (1, "Canon EF 50mm f/1.8"),
    (1, "Sigma 50mm f/2.8 EX"),
    (1, "Sigma 28mm f/1.8"),
    (2, "Canon EF 28mm f/2.8"),
    (2, "Sigma 105mm f/2.8 Macro EX"),
    (3, "Canon EF 135mm f/2.8 Soft"),
    (4, "Canon EF 35-105mm f/3.5-4.5"),
    (4, "Sigma UC Zoom 35-135mm f/4-5.6"),
    (5, "Canon EF 35-70mm f/3.5-4.5"),
    (6, "Canon EF 28-70mm f/3.5-4.5"),
    (6, "Sigma 18-50mm f/3.5-5.6 DC"),
    (6, "Sigma 18-125mm f/3.5-5.6 DC IF ASP"),
    (6, "Tokina AF 193-2 19-35mm f/3.5-4.5"),
    (7, "Canon EF 100-300mm f/5.6L"),
    (8, "Canon EF 100-300mm f/5.6"),
    (8, "Sigma 70-300mm f/4-5.6 [APO] DG Macro"),
    (8, "Tokina AT-X 242 AF 24-200mm f/3.5-5.6"),
    (9, "Canon EF 70-210mm f/4"),
    (9, "Sigma 55-200mm f/4-5.6 DC"),
    (10, "Canon EF 50mm f/2.5 Macro"),
    (10, "Sigma 50mm f/2.8 EX"),
    (10, "Sigma 28mm f/1.8"),
    (11, "Canon EF 35mm f/2"),
    (13, "Canon EF 15mm f/2.8 Fisheye"),
    (14, "Canon EF 50-200mm f/3.5-4.5L"),
    (15, "Canon EF 50-200mm f/3.5-4.5"),
    (16, "Canon EF 35-135mm f/3.5-4.5"),
    (17, "Canon EF 35-70mm f/3.5-4.5A"),
    (18, "Canon EF 28-70mm f/3.5-4.5"),
    (20, "Canon EF 100-200mm f/4.5A"),
    (21, "Canon EF 80-200mm f/2.8L"),
    (22, "Canon EF 20-35mm f/2.8L"),
    (22, "Tokina AT-X 280 AF Pro 28-80mm f/2.8 Aspherical"),
    (23, "Canon EF 35-105mm f/3.5-4.5"),
    (24, "Canon EF 35-80mm f/4-5.6 Power Zoom"),
    (25, "Canon EF 35-80mm f/4-5.6 Power Zoom"),
    (26, "Canon EF 100mm f/2.8 Macro"),
    (26, "Cosina 100mm f/3.5 Macro AF"),
    (26, "Tamron SP AF 90mm f/2.8 Di Macro"),
    (26, "Tamron SP AF 180mm f/3.5 Di Macro"),
    (26, "Carl Zeiss Planar T* 50mm f/1.4"),
    (27, "Canon EF 35-80mm f/4-5.6"),
    (28, "Canon EF 80-200mm f/4.5-5.6"),
    (28, "Tamron SP AF 28-105mm f/2.8 LD Aspherical IF"),
    (28, "Tamron SP AF 28-75mm f/2.8 XR Di LD Aspherical [IF] Macro"),
    (28, "Tamron AF 70-300mm f/4-5.6 Di LD 1:2 Macro"),
    (28, "Tamron AF Aspherical 28-200mm f/3.8-5.6"),
    (29, "Canon EF 50mm f/1.8 II"),
    (30, "Canon EF 35-105mm f/4.5-5.6"),
    (31, "Canon EF 75-300mm f/4-5.6"),
    (31, "Tamron SP AF 300mm f/2.8 LD IF"),
    (32, "Canon EF 24mm f/2.8"),
    (32, "Sigma 15mm f/2.8 EX Fisheye"),
    (33, "Voigtlander or Carl Zeiss Lens"),
    (35, "Canon EF 35-80mm f/4-5.6"),
    (36, "Canon EF 38-76mm f/4.5-5.6"),
    (37, "Canon EF 35-80mm f/4-5.6"),
    (37, "Tamron 70-200mm f/2.8 Di LD IF Macro"),
    (37, "Tamron AF 28-300mm f/3.5-6.3 XR Di VC LD Aspherical [IF] Macro"),
    (38, "Canon EF 80-200mm f/4.5-5.6 II"),
    (39, "Canon EF 75-300mm f/4-5.6"),
    (40, "Canon EF 28-80mm f/3.5-5.6"),
    (41, "Canon EF 28-90mm f/4-5.6"),
    (42, "Canon EF 28-200mm f/3.5-5.6"),
    (42, "Tamron AF 28-300mm f/3.5-6.3 XR Di VC LD Aspherical [IF] Macro"),
    (43, "Canon EF 28-105mm f/4-5.6"),
    (44, "Canon EF 90-300mm f/4.5-5.6"),
    (45, "Canon EF-S 18-55mm f/3.5-5.6 [II]"),
    (46, "Canon EF 28-90mm f/4-5.6"),
    (48, "Canon EF-S 18-55mm f/3.5-5.6 IS"),
    (49, "Canon EF-S 55-250mm f/4-5.6 IS"),
    (50, "Canon EF-S 18-200mm f/3.5-5.6 IS"),
    (51, "Canon EF-S 18-135mm f/3.5-5.6 IS"),
    (52, "Canon EF-S 18-55mm f/3.5-5.6 IS II"),
    (53, "Canon EF-S 18-55mm f/3.5-5.6 III"),
    (54, "Canon EF-S 55-250mm f/4-5.6 IS II"),
    (94, "Canon TS-E 17mm f/4L"),
    (95, "Canon TS-E 24mm f/3.5L II"),
    (124, "Canon MP-E 65mm f/2.8 1-5x Macro Photo"),
    (125, "Canon TS-E 24mm f/3.5L"),
    (126, "Canon TS-E 45mm f/2.8"),
    (127, "Canon TS-E 90mm f/2.8"),
    (129, "Canon EF 300mm f/2.8L USM"),
    (130, "Canon EF 50mm f/1.0L USM"),
    (131, "Canon EF 28-80mm f/2.8-4L USM"),
    (131, "Sigma 8mm f/3.5 EX DG Circular Fisheye"),
    (131, "Sigma 17-35mm f/2.8-4 EX DG Aspherical HSM"),
    (131, "Sigma 17-70mm f/2.8-4.5 DC Macro"),
    (131, "Sigma APO 50-150mm f/2.8 [II] EX DC HSM"),
    (131, "Sigma APO 120-300mm f/2.8 EX DG HSM"),
    (132, "Canon EF 1200mm f/5.6L USM"),
    (134, "Canon EF 600mm f/4L IS USM"),
    (135, "Canon EF 200mm f/1.8L USM"),
    (136, "Canon EF 300mm f/2.8L USM"),
    (136, "Tamron SP 15-30mm f/2.8 Di VC USD"),
    (137, "Canon EF 85mm f/1.2L USM"),
    (137, "Sigma 18-50mm f/2.8-4.5 DC OS HSM"),
    (137, "Sigma 50-200mm f/4-5.6 DC OS HSM"),
    (137, "Sigma 18-250mm f/3.5-6.3 DC OS HSM"),
    (137, "Sigma 24-70mm f/2.8 IF EX DG HSM"),
    (137, "Sigma 18-125mm f/3.8-5.6 DC OS HSM"),
    (137, "Sigma 17-70mm f/2.8-4 DC Macro OS HSM | C"),
    (137, "Sigma 17-50mm f/2.8 OS HSM"),
    (137, "Sigma 18-200mm f/3.5-6.3 DC OS HSM [II]"),
    (137, "Tamron AF 18-270mm f/3.5-6.3 Di II VC PZD"),
    (137, "Sigma 8-16mm f/4.5-5.6 DC HSM"),
    (137, "Tamron SP 17-50mm f/2.8 XR Di II VC LD Aspherical [IF]"),
    (137, "Tamron SP 60mm f/2 Macro Di II"),
    (137, "Sigma 10-20mm f/3.5 EX DC HSM"),
    (137, "Tamron SP 24-70mm f/2.8 Di VC USD"),
    (137, "Sigma 18-35mm f/1.8 DC HSM"),
    (137, "Sigma 12-24mm f/4.5-5.6 DG HSM II"),
    (138, "Canon EF 28-80mm f/2.8-4L"),
    (139, "Canon EF 400mm f/2.8L USM"),
    (140, "Canon EF 500mm f/4.5L USM"),
    (141, "Canon EF 500mm f/4.5L USM"),
    (142, "Canon EF 300mm f/2.8L IS USM"),
    (143, "Canon EF 500mm f/4L IS USM"),
    (143, "Sigma 17-70mm f/2.8-4 DC Macro OS HSM"),
    (144, "Canon EF 35-135mm f/4-5.6 USM"),
    (145, "Canon EF 100-300mm f/4.5-5.6 USM"),
    (146, "Canon EF 70-210mm f/3.5-4.5 USM"),
    (147, "Canon EF 35-135mm f/4-5.6 USM"),
    (148, "Canon EF 28-80mm f/3.5-5.6 USM"),
    (149, "Canon EF 100mm f/2 USM"),
    (150, "Canon EF 14mm f/2.8L USM"),
    (150, "Sigma 20mm EX f/1.8"),
    (150, "Sigma 30mm f/1.4 DC HSM"),
    (150, "Sigma 24mm f/1.8 DG Macro EX"),
    (150, "Sigma 28mm f/1.8 DG Macro EX"),
    (151, "Canon EF 200mm f/2.8L USM"),
    (152, "Canon EF 300mm f/4L IS USM"),
    (152, "Sigma 12-24mm f/4.5-5.6 EX DG ASPHERICAL HSM"),
    (152, "Sigma 14mm f/2.8 EX Aspherical HSM"),
    (152, "Sigma 10-20mm f/4-5.6"),
    (152, "Sigma 100-300mm f/4"),
    (153, "Canon EF 35-350mm f/3.5-5.6L USM"),
    (153, "Sigma 50-500mm f/4-6.3 APO HSM EX"),
    (153, "Tamron AF 28-300mm f/3.5-6.3 XR LD Aspherical [IF] Macro"),
    (153, "Tamron AF 18-200mm f/3.5-6.3 XR Di II LD Aspherical [IF] Macro"),
    (153, "Tamron 18-250mm f/3.5-6.3 Di II LD Aspherical [IF] Macro"),
    (154, "Canon EF 20mm f/2.8 USM"),
    (154, "Zeiss Milvus 21mm f/2.8"),
    (155, "Canon EF 85mm f/1.8 USM"),
    (155, "Sigma 14mm f/1.8 DG HSM | A"),
    (156, "Canon EF 28-105mm f/3.5-4.5 USM"),
    (156, "Tamron SP 70-300mm f/4-5.6 Di VC USD"),
    (156, "Tamron SP AF 28-105mm f/2.8 LD Aspherical IF"),
    (160, "Canon EF 20-35mm f/3.5-4.5 USM"),
    (160, "Tamron AF 19-35mm f/3.5-4.5"),
    (160, "Tokina AT-X 124 AF Pro DX 12-24mm f/4"),
    (160, "Tokina AT-X 107 AF DX 10-17mm f/3.5-4.5 Fisheye"),
    (160, "Tokina AT-X 116 AF Pro DX 11-16mm f/2.8"),
    (160, "Tokina AT-X 11-20 F2.8 PRO DX Aspherical 11-20mm f/2.8"),
    (161, "Canon EF 28-70mm f/2.8L USM"),
    (161, "Sigma 24-70mm f/2.8 EX"),
    (161, "Sigma 28-70mm f/2.8 EX"),
    (161, "Sigma 24-60mm f/2.8 EX DG"),
    (161, "Tamron AF 17-50mm f/2.8 Di-II LD Aspherical"),
    (161, "Tamron 90mm f/2.8"),
    (161, "Tamron SP AF 17-35mm f/2.8-4 Di LD Aspherical IF"),
    (161, "Tamron SP AF 28-75mm f/2.8 XR Di LD Aspherical [IF] Macro"),
    (162, "Canon EF 200mm f/2.8L USM"),
    (163, "Canon EF 300mm f/4L"),
    (164, "Canon EF 400mm f/5.6L"),
    (165, "Canon EF 70-200mm f/2.8L USM"),
    (166, "Canon EF 70-200mm f/2.8L USM + 1.4x"),
    (167, "Canon EF 70-200mm f/2.8L USM + 2x"),
    (168, "Canon EF 28mm f/1.8 USM"),
    (168, "Sigma 50-100mm f/1.8 DC HSM | A"),
    (169, "Canon EF 17-35mm f/2.8L USM"),
    (169, "Sigma 18-200mm f/3.5-6.3 DC OS"),
    (169, "Sigma 15-30mm f/3.5-4.5 EX DG Aspherical"),
    (169, "Sigma 18-50mm f/2.8 Macro"),
    (169, "Sigma 50mm f/1.4 EX DG HSM"),
    (169, "Sigma 85mm f/1.4 EX DG HSM"),
    (169, "Sigma 30mm f/1.4 EX DC HSM"),
    (169, "Sigma 35mm f/1.4 DG HSM"),
    (170, "Canon EF 200mm f/2.8L II USM"),
    (171, "Canon EF 300mm f/4L USM"),
    (172, "Canon EF 400mm f/5.6L USM"),
    (173, "Canon EF 180mm Macro f/3.5L USM"),
    (173, "Sigma 180mm EX HSM Macro f/3.5"),
    (173, "Sigma APO Macro 150mm f/2.8 EX DG HSM"),
    (174, "Canon EF 135mm f/2L USM"),
    (174, "Sigma 70-200mm f/2.8 EX DG APO OS HSM"),
    (174, "Sigma 50-500mm f/4.5-6.3 APO DG OS HSM"),
    (174, "Sigma 150-500mm f/5-6.3 APO DG OS HSM"),
    (175, "Canon EF 400mm f/2.8L USM"),
    (176, "Canon EF 24-85mm f/3.5-4.5 USM"),
    (177, "Canon EF 300mm f/4L IS USM"),
    (178, "Canon EF 28-135mm f/3.5-5.6 IS"),
    (179, "Canon EF 24mm f/1.4L USM"),
    (180, "Canon EF 35mm f/1.4L USM"),
    (180, "Sigma 50mm f/1.4 DG HSM | A"),
    (180, "Sigma 24mm f/1.4 DG HSM | A"),
    (181, "Canon EF 100-400mm f/4.5-5.6L IS USM + 1.4x"),
    (181, "Sigma 150-600mm f/5-6.3 DG OS HSM | S + 1.4x"),
    (182, "Canon EF 100-400mm f/4.5-5.6L IS USM + 2x"),
    (182, "Sigma 150-600mm f/5-6.3 DG OS HSM | S + 2x"),
    (183, "Canon EF 100-400mm f/4.5-5.6L IS USM"),
    (183, "Sigma 150mm f/2.8 EX DG OS HSM APO Macro"),
    (183, "Sigma 105mm f/2.8 EX DG OS HSM Macro"),
    (183, "Sigma 180mm f/2.8 EX DG OS HSM APO Macro"),
    (183, "Sigma 150-600mm f/5-6.3 DG OS HSM | C"),
    (183, "Sigma 150-600mm f/5-6.3 DG OS HSM | S"),
    (183, "Sigma 100-400mm f/5-6.3 DG OS HSM"),
    (184, "Canon EF 400mm f/2.8L USM + 2x"),
    (185, "Canon EF 600mm f/4L IS USM"),
    (186, "Canon EF 70-200mm f/4L USM"),
    (187, "Canon EF 70-200mm f/4L USM + 1.4x"),
    (188, "Canon EF 70-200mm f/4L USM + 2x"),
    (189, "Canon EF 70-200mm f/4L USM + 2.8x"),
    (190, "Canon EF 100mm f/2.8 Macro USM"),
    (191, "Canon EF 400mm f/4 DO IS"),
    (193, "Canon EF 35-80mm f/4-5.6 USM"),
    (194, "Canon EF 80-200mm f/4.5-5.6 USM"),
    (195, "Canon EF 35-105mm f/4.5-5.6 USM"),
    (196, "Canon EF 75-300mm f/4-5.6 USM"),
    (197, "Canon EF 75-300mm f/4-5.6 IS USM"),
    (198, "Canon EF 50mm f/1.4 USM"),
    (198, "Zeiss Otus 55mm f/1.4"),
    (199, "Canon EF 28-80mm f/3.5-5.6 USM"),
    (200, "Canon EF 75-300mm f/4-5.6 USM"),
    (201, "Canon EF 28-80mm f/3.5-5.6 USM"),
    (202, "Canon EF 28-80mm f/3.5-5.6 USM IV"),
    (208, "Canon EF 22-55mm f/4-5.6 USM"),
    (209, "Canon EF 55-200mm f/4.5-5.6"),
    (210, "Canon EF 28-90mm f/4-5.6 USM"),
    (211, "Canon EF 28-200mm f/3.5-5.6 USM"),
    (212, "Canon EF 28-105mm f/4-5.6 USM"),
    (213, "Canon EF 90-300mm f/4.5-5.6 USM"),
    (213, "Tamron SP 150-600mm f/5-6.3 Di VC USD"),
    (213, "Tamron 16-300mm f/3.5-6.3 Di II VC PZD Macro"),
    (213, "Tamron SP 35mm f/1.8 Di VC USD"),
    (213, "Tamron SP 45mm f/1.8 Di VC USD"),
    (214, "Canon EF-S 18-55mm f/3.5-5.6 USM"),
    (215, "Canon EF 55-200mm f/4.5-5.6 II USM"),
    (224, "Canon EF 70-200mm f/2.8L IS USM"),
    (225, "Canon EF 70-200mm f/2.8L IS USM + 1.4x"),
    (226, "Canon EF 70-200mm f/2.8L IS USM + 2x"),
    (227, "Canon EF 70-200mm f/2.8L IS USM + 2.8x"),
    (228, "Canon EF 28-105mm f/3.5-4.5 USM"),
    (229, "Canon EF 16-35mm f/2.8L USM"),
    (230, "Canon EF 24-70mm f/2.8L USM"),
    (231, "Canon EF 17-40mm f/4L USM"),
    (231, "Sigma 12-24mm f/4 DG HSM A016"),
    (232, "Canon EF 70-300mm f/4.5-5.6 DO IS USM"),
    (233, "Canon EF 28-300mm f/3.5-5.6L IS USM"),
    (234, "Canon EF-S 17-85mm f/4-5.6 IS USM"),
    (234, "Tokina AT-X 12-28 PRO DX 12-28mm f/4"),
    (235, "Canon EF-S 10-22mm f/3.5-4.5 USM"),
    (236, "Canon EF-S 60mm f/2.8 Macro USM"),
    (237, "Canon EF 24-105mm f/4L IS USM"),
    (238, "Canon EF 70-300mm f/4-5.6 IS USM"),
    (239, "Canon EF 85mm f/1.2L II USM"),
    (239, "Rokinon SP 85mm f/1.2"),
    (240, "Canon EF-S 17-55mm f/2.8 IS USM"),
    (240, "Sigma 17-50mm f/2.8 EX DC OS HSM"),
    (241, "Canon EF 50mm f/1.2L USM"),
    (242, "Canon EF 70-200mm f/4L IS USM"),
    (243, "Canon EF 70-200mm f/4L IS USM + 1.4x"),
    (244, "Canon EF 70-200mm f/4L IS USM + 2x"),
    (245, "Canon EF 70-200mm f/4L IS USM + 2.8x"),
    (246, "Canon EF 16-35mm f/2.8L II USM"),
    (247, "Canon EF 14mm f/2.8L II USM"),
    (248, "Canon EF 200mm f/2L IS USM"),
    (248, "Sigma 24-35mm f/2 DG HSM | A"),
    (248, "Sigma 135mm f/1.8 DG HSM | A"),
    (249, "Canon EF 800mm f/5.6L IS USM"),
    (250, "Canon EF 24mm f/1.4L II USM"),
    (250, "Sigma 20mm f/1.4 DG HSM | A"),
    (251, "Canon EF 70-200mm f/2.8L IS II USM"),
    (252, "Canon EF 70-200mm f/2.8L IS II USM + 1.4x"),
    (253, "Canon EF 70-200mm f/2.8L IS II USM + 2x"),
    (254, "Canon EF 100mm f/2.8L Macro IS USM"),
    (255, "Sigma 24-105mm f/4 DG OS HSM | A"),
    (255, "Sigma 180mm f/2.8 EX DG OS HSM APO Macro"),
    (368, "Sigma 14-24mm f/2.8 DG HSM | A"),
    (368, "Sigma 20mm f/1.4 DG HSM | A"),
    (368, "Sigma 50mm f/1.4 DG HSM | A"),
    (368, "Sigma 40mm f/1.4 DG HSM | A"),
    (368, "Sigma 60-600mm f/4.5-6.3 DG OS HSM | S"),
    (368, "Sigma 28mm f/1.4 DG HSM | A"),
    (368, "Sigma 150-600mm f/5-6.3 DG OS HSM | S"),
    (368, "Sigma 85mm f/1.4 DG HSM | A"),
    (368, "Sigma 105mm f/1.4 DG HSM"),
    (368, "Sigma 14-24mm f/2.8 DG HSM"),
    (368, "Sigma 70mm f/2.8 DG Macro"),
    (368, "Sigma 18-35mm f/1.8 DC HSM | A"),
    (368, "Sigma 35mm f/1.4 DG HSM | A"),
    (488, "Canon EF-S 15-85mm f/3.5-5.6 IS USM"),
    (489, "Canon EF 70-300mm f/4-5.6L IS USM"),
    (490, "Canon EF 8-15mm f/4L Fisheye USM"),
    (491, "Canon EF 300mm f/2.8L IS II USM"),
    (491, "Tamron SP 70-200mm f/2.8 Di VC USD G2"),
    (491, "Tamron 18-400mm f/3.5-6.3 Di II VC HLD"),
    (491, "Tamron 100-400mm f/4.5-6.3 Di VC USD"),
    (491, "Tamron 70-210mm f/4 Di VC USD"),
    (491, "Tamron 70-210mm f/4 Di VC USD + 1.4x"),
    (491, "Tamron SP 24-70mm f/2.8 Di VC USD G2"),
    (492, "Canon EF 400mm f/2.8L IS II USM"),
    (493, "Canon EF 500mm f/4L IS II USM"),
    (493, "Canon EF 24-105mm f/4L IS USM"),
    (494, "Canon EF 600mm f/4L IS II USM"),
    (495, "Canon EF 24-70mm f/2.8L II USM"),
    (495, "Sigma 24-70mm f/2.8 DG OS HSM | A"),
    (496, "Canon EF 200-400mm f/4L IS USM"),
    (499, "Canon EF 200-400mm f/4L IS USM + 1.4x"),
    (502, "Canon EF 28mm f/2.8 IS USM"),
    (502, "Tamron 35mm f/1.8 Di VC USD"),
    (503, "Canon EF 24mm f/2.8 IS USM"),
    (504, "Canon EF 24-70mm f/4L IS USM"),
    (505, "Canon EF 35mm f/2 IS USM"),
    (506, "Canon EF 400mm f/4 DO IS II USM"),
    (507, "Canon EF 16-35mm f/4L IS USM"),
    (508, "Canon EF 11-24mm f/4L USM"),
    (508, "Tamron 10-24mm f/3.5-4.5 Di II VC HLD"),
    (624, "Sigma 70-200mm f/2.8 DG OS HSM | S"),
    (747, "Canon EF 100-400mm f/4.5-5.6L IS II USM"),
    (747, "Tamron SP 150-600mm f/5-6.3 Di VC USD G2"),
    (748, "Canon EF 100-400mm f/4.5-5.6L IS II USM + 1.4x"),
    (748, "Tamron 100-400mm f/4.5-6.3 Di VC USD + 2x"),
    (750, "Canon EF 35mm f/1.4L II USM"),
    (750, "Tamron SP 85mm f/1.8 Di VC USD"),
    (750, "Tamron SP 45mm f/1.8 Di VC USD"),
    (751, "Canon EF 16-35mm f/2.8L III USM"),
    (752, "Canon EF 24-105mm f/4L IS II USM"),
    (753, "Canon EF 85mm f/1.4L IS USM"),
    (754, "Canon EF 70-200mm f/4L IS II USM"),
    (757, "Canon EF 400mm f/2.8L IS III USM"),
    (758, "Canon EF 600mm f/4L IS III USM"),
    (1136, "Sigma 24-70mm f/2.8 DG OS HSM | A"),
    (4142, "Canon EF-S 18-135mm f/3.5-5.6 IS STM"),
    (4143, "Canon EF-M 18-55mm f/3.5-5.6 IS STM"),
    (4143, "Tamron 18-200mm f/3.5-6.3 Di III VC"),
    (4144, "Canon EF 40mm f/2.8 STM"),
    (4145, "Canon EF-M 22mm f/2 STM"),
    (4146, "Canon EF-S 18-55mm f/3.5-5.6 IS STM"),
    (4147, "Canon EF-M 11-22mm f/4-5.6 IS STM"),
    (4148, "Canon EF-S 55-250mm f/4-5.6 IS STM"),
    (4149, "Canon EF-M 55-200mm f/4.5-6.3 IS STM"),
    (4150, "Canon EF-S 10-18mm f/4.5-5.6 IS STM"),
    (4152, "Canon EF 24-105mm f/3.5-5.6 IS STM"),
    (4153, "Canon EF-M 15-45mm f/3.5-6.3 IS STM"),
    (4154, "Canon EF-S 24mm f/2.8 STM"),
    (4155, "Canon EF-M 28mm f/3.5 Macro IS STM"),
    (4156, "Canon EF 50mm f/1.8 STM"),
    (4157, "Canon EF-M 18-150mm f/3.5-6.3 IS STM"),
    (4158, "Canon EF-S 18-55mm f/4-5.6 IS STM"),
    (4159, "Canon EF-M 32mm f/1.4 STM"),
    (4160, "Canon EF-S 35mm f/2.8 Macro IS STM"),
    (36910, "Canon EF 70-300mm f/4-5.6 IS II USM"),
    (36912, "Canon EF-S 18-135mm f/3.5-5.6 IS USM"),
    (61182, "Canon RF 35mm f/1.8 IS Macro STM"),
    (61182, "Canon RF 50mm f/1.2L USM"),
    (61182, "Canon RF 24-105mm f/4L IS USM"),
    (61182, "Canon RF 28-70mm f/2L USM"),
    (61182, "Canon RF 85mm f/1.2L USM"),
    (61182, "Canon RF 24-240mm f/4-6.3 IS USM"),
    (61182, "Canon RF 24-70mm f/2.8L IS USM"),
    (61182, "Canon RF 15-35mm f/2.8L IS USM"),
    (61182, "Canon RF 100-500mm f/4.5-7.1L IS USM"),
    (61491, "Canon CN-E 14mm T3.1 L F"),
    (61492, "Canon CN-E 24mm T1.5 L F"),
    (61494, "Canon CN-E 85mm T1.3 L F"),
    (61495, "Canon CN-E 135mm T2.2 L F"),
    (61496, "Canon CN-E 35mm T1.5 L F"),
    (65535, "n/a"),
];

/// Sony/Minolta lens IDs, from `Exif.Sony1.LensID` and friends.
pub static SONY_LENS: &[(i64, &str)] = &[
    (0, "Minolta AF 28-85mm F3.5-4.5 New"),
    (1, "Minolta AF 80-200mm F2.8 HS-APO G"),
    (2, "Minolta AF 28-70mm F2.8 G"),
    (3, "Minolta AF 28-80mm F4-5.6"),
    (4, "Minolta AF 85mm F1.4G"),
    (5, "Minolta AF 35-70mm F3.5-4.5 [II]"),
    (6, "Minolta AF 24-85mm F3.5-4.5 [New]"),
    (7, "Minolta AF 100-300mm F4.5-5.6 APO [New] or 100-400mm or Sigma Lens"),
    (8, "Minolta AF 70-210mm F4.5-5.6 [II]"),
    (9, "Minolta AF 50mm F3.5 Macro"),
    (10, "Minolta AF 28-105mm F3.5-4.5 [New]"),
    (11, "Minolta AF 300mm F4 HS-APO G"),
    (12, "Minolta AF 100mm F2.8 Soft Focus"),
    (13, "Minolta AF 75-300mm F4.5-5.6 (New or II)"),
    (14, "Minolta AF 100-400mm F4.5-6.7 APO"),
    (15, "Minolta AF 400mm F4.5 HS-APO G"),
    (16, "Minolta AF 17-35mm F3.5 G"),
    (17, "Minolta AF 20-35mm F3.5-4.5"),
    (18, "Minolta AF 28-80mm F3.5-5.6 II"),
    (19, "Minolta AF 35mm F1.4 G"),
    (20, "Minolta/Sony 135mm F2.8 [T4.5] STF"),
    (22, "Minolta AF 35-80mm F4-5.6 II"),
    (23, "Minolta AF 200mm F4 Macro APO G"),
    (24, "Minolta/Sony AF 24-105mm F3.5-4.5 (D)"),
    (24, "Sigma 18-50mm F2.8"),
    (24, "Sigma 17-70mm F2.8-4.5 DC Macro"),
    (24, "Sigma 20-40mm F2.8 EX DG Aspherical IF"),
    (24, "Sigma 18-200mm F3.5-6.3 DC"),
    (24, "Sigma DC 18-125mm F4-5,6 D"),
    (24, "Tamron SP AF 28-75mm F2.8 XR Di LD Aspherical [IF] Macro"),
    (25, "Minolta AF 100-300mm F4.5-5.6 APO (D)"),
    (25, "Sigma 100-300mm F4 EX (APO (D) or D IF)"),
    (25, "Sigma 70mm F2.8 EX DG Macro"),
    (25, "Sigma 20mm F1.8 EX DG Aspherical RF"),
    (25, "Sigma 30mm F1.4 EX DC"),
    (25, "Sigma 24mm F1.8 EX DG ASP Macro"),
    (27, "Minolta AF 85mm F1.4 G (D)"),
    (28, "Minolta/Sony AF 100mm F2.8 Macro (D)"),
    (28, "Tamron SP AF 90mm F2.8 Di Macro"),
    (28, "Tamron SP AF 180mm F3.5 Di LD [IF] Macro"),
    (29, "Minolta/Sony AF 75-300mm F4.5-5.6 (D)"),
    (30, "Minolta AF 28-80mm F3.5-5.6 (D)"),
    (30, "Sigma AF 10-20mm F4-5.6 EX DC"),
    (30, "Sigma AF 12-24mm F4.5-5.6 EX DG"),
    (30, "Sigma 28-70mm EX DG F2.8"),
    (30, "Sigma 55-200mm F4-5.6 DC"),
    (31, "Minolta/Sony AF 50mm F2.8 Macro (D)"),
    (31, "Minolta/Sony AF 50mm F3.5 Macro"),
    (32, "Minolta/Sony AF 300mm F2.8 G or 1.5x Teleconverter"),
    (33, "Minolta/Sony AF 70-200mm F2.8 G"),
    (35, "Minolta AF 85mm F1.4 G (D) Limited"),
    (36, "Minolta AF 28-100mm F3.5-5.6 (D)"),
    (38, "Minolta AF 17-35mm F2.8-4 (D)"),
    (39, "Minolta AF 28-75mm F2.8 (D)"),
    (40, "Minolta/Sony AF DT 18-70mm F3.5-5.6 (D)"),
    (41, "Minolta/Sony AF DT 11-18mm F4.5-5.6 (D)"),
    (41, "Tamron SP AF 11-18mm F4.5-5.6 Di II LD Aspherical IF"),
    (42, "Minolta/Sony AF DT 18-200mm F3.5-6.3 (D)"),
    (43, "Sony 35mm F1.4 G (SAL35F14G)"),
    (44, "Sony 50mm F1.4 (SAL50F14)"),
    (45, "Carl Zeiss Planar T* 85mm F1.4 ZA (SAL85F14Z)"),
    (46, "Carl Zeiss Vario-Sonnar T* DT 16-80mm F3.5-4.5 ZA (SAL1680Z)"),
    (47, "Carl Zeiss Sonnar T* 135mm F1.8 ZA (SAL135F18Z)"),
    (48, "Carl Zeiss Vario-Sonnar T* 24-70mm F2.8 ZA SSM (SAL2470Z)"),
    (49, "Sony DT 55-200mm F4-5.6 (SAL55200)"),
    (50, "Sony DT 18-250mm F3.5-6.3 (SAL18250)"),
    (51, "Sony DT 16-105mm F3.5-5.6 (SAL16105)"),
    (52, "Sony 70-300mm F4.5-5.6 G SSM (SAL70300G)"),
    (53, "Sony 70-400mm F4-5.6 G SSM (SAL70400G)"),
    (54, "Carl Zeiss Vario-Sonnar T* 16-35mm F2.8 ZA SSM (SAL1635Z)"),
    (55, "Sony DT 18-55mm F3.5-5.6 SAM (SAL1855)"),
    (56, "Sony DT 55-200mm F4-5.6 SAM (SAL55200-2)"),
    (57, "Sony DT 50mm F1.8 SAM (SAL50F18)"),
    (57, "Tamron SP AF 60mm F2 Di II LD [IF] Macro 1:1"),
    (57, "Tamron 18-270mm F3.5-6.3 Di II PZD"),
    (58, "Sony DT 30mm F2.8 Macro SAM (SAL30M28)"),
    (59, "Sony 28-75mm F2.8 SAM (SAL2875)"),
    (60, "Carl Zeiss Distagon T* 24mm F2 ZA SSM (SAL24F20Z)"),
    (61, "Sony 85mm F2.8 SAM (SAL85F28)"),
    (62, "Sony DT 35mm F1.8 SAM (SAL35F18)"),
    (63, "Sony DT 16-50mm F2.8 SSM (SAL1650)"),
    (64, "Sony 500mm F4 G SSM (SAL500F40G)"),
    (65, "Sony DT 18-135mm F3.5-5.6 SAM (SAL18135)"),
    (66, "Sony 300mm F2.8 G SSM II (SAL300F28G2)"),
    (67, "Sony 70-200mm F2.8 G SSM II (SAL70200G2)"),
    (68, "Sony DT 55-300mm F4.5-5.6 SAM (SAL55300)"),
    (69, "Sony 70-400mm F4-5.6 G SSM II (SAL70400G2)"),
    (70, "Carl Zeiss Planar T* 50mm F1.4 ZA SSM (SAL50F14Z)"),
    (128, "Tamron or Sigma Lens (128)"),
    (128, "Tamron AF 18-200mm F3.5-6.3 XR Di II LD Aspherical [IF] Macro"),
    (128, "Tamron AF 28-300mm F3.5-6.3 XR Di LD Aspherical [IF] Macro"),
    (128, "Tamron 80-300mm F3.5-6.3"),
    (128, "Sigma 10-20mm F3.5 EX DC HSM"),
    (128, "Sigma 70-200mm F2.8 II EX DG APO MACRO HSM"),
    (129, "Tamron Lens (129)"),
    (129, "Tamron 200-400mm F5.6 LD"),
    (129, "Tamron 70-300mm F4-5.6 LD"),
    (131, "Tamron 20-40mm F2.7-3.5 SP Aspherical IF"),
    (135, "Vivitar 28-210mm F3.5-5.6"),
    (136, "Tokina EMZ M100 AF 100mm F3.5"),
    (137, "Cosina 70-210mm F2.8-4 AF"),
    (138, "Soligor 19-35mm F3.5-4.5"),
    (142, "Voigtlander 70-300mm F4.5-5.6"),
    (146, "Voigtlander Macro APO-Lanthar 125mm F2.5 SL"),
    (194, "Tamron SP AF 17-50mm F2.8 XR Di II LD Aspherical [IF]"),
    (255, "Tamron Lens (255)"),
    (255, "Tamron SP AF 17-50mm F2.8 XR Di II LD Aspherical"),
    (255, "Tamron AF 18-250mm F3.5-6.3 XR Di II LD"),
    (255, "Tamron AF 55-200mm F4-5.6 Di II LD Macro"),
    (255, "Tamron AF 70-300mm F4-5.6 Di LD Macro 1:2"),
    (255, "Tamron SP AF 200-500mm F5.0-6.3 Di LD IF"),
    (255, "Tamron SP AF 10-24mm F3.5-4.5 Di II LD Aspherical IF"),
    (255, "Tamron SP AF 70-200mm F2.8 Di LD IF Macro"),
    (255, "Tamron SP AF 28-75mm F2.8 XR Di LD Aspherical IF"),
    (255, "Tamron AF 90-300mm F4.5-5.6 Telemacro"),
    (25501, "Minolta AF 50mm F1.7"),
    (25511, "Minolta AF 35-70mm F4 or Other Lens"),
    (25521, "Minolta AF 28-85mm F3.5-4.5 or Other Lens"),
    (25531, "Minolta AF 28-135mm F4-4.5 or Other Lens"),
    (25541, "Minolta AF 35-105mm F3.5-4.5"),
    (25551, "Minolta AF 70-210mm F4 Macro or Sigma Lens"),
    (25561, "Minolta AF 135mm F2.8"),
    (25571, "Minolta/Sony AF 28mm F2.8"),
    (25581, "Minolta AF 24-50mm F4"),
    (25601, "Minolta AF 100-200mm F4.5"),
    (25611, "Minolta AF 75-300mm F4.5-5.6 or Sigma Lens"),
    (25621, "Minolta AF 50mm F1.4 [New]"),
    (25631, "Minolta AF 300mm F2.8 APO or Sigma Lens"),
    (25641, "Minolta AF 50mm F2.8 Macro or Sigma Lens"),
    (25651, "Minolta AF 600mm F4 APO"),
    (25661, "Minolta AF 24mm F2.8 or Sigma Lens"),
    (65535, "E-Mount, T-Mount, Other Lens or no lens"),
];

/// Every name registered for a lens ID, in table order.
///
/// ```
/// use imgmeta_types::exif::lens::{CANON_LENS, candidates};
///
/// assert_eq!(candidates(CANON_LENS, 747).len(), 2);
/// assert!(candidates(CANON_LENS, 12345).is_empty());
/// ```
pub fn candidates(table: &'static [(i64, &'static str)], id: i64) -> Vec<&'static str> {
    table
        .iter()
        .filter(|(lens_id, _)| *lens_id == id)
        .map(|(_, name)| *name)
        .collect()
}
